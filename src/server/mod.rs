//! HTTP boundary
//!
//! Thin plumbing around the storage engine: routing, the bearer-token gate,
//! the JSON envelope, and static serving of the public root.

pub mod auth;
pub mod core;
pub mod handlers;

pub use core::Server;
