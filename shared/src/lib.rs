//! Shared types for the krill group-purchase service
//!
//! Contains the domain models, the unified error code/response types and
//! small time/ID utilities used by the server crate.

pub mod error;
pub mod models;
pub mod util;

pub use error::{AppError, AppResult, ErrorCode};
