//! Error handling
//!
//! Defines error types and handling for the shelf server.

pub mod types;

pub use types::*;
