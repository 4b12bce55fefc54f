//! krill-server library — group-purchase campaign coordination
//!
//! Exposes the service internals (config, state, storage, lifecycle,
//! API) for the binary in `main.rs` and for integration tests.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod lifecycle;
pub mod state;
