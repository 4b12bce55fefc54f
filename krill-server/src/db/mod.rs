//! Database access layer
//!
//! Free async functions over `&SqlitePool`, one module per concern.
//! This layer is deliberately permissive: it persists whatever it is
//! given (no price/date/name validation) and surfaces not-found as
//! `None` / zero rows affected. Callers validate first.

pub mod aggregates;
pub mod campaigns;
pub mod items;
pub mod orders;
