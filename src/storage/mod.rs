//! Dual-root storage
//!
//! Implements the visibility state machine and path-safety engine: name
//! validation, the two physical roots, item resolution, and the storage
//! engine composing them.

pub mod engine;
pub mod resolver;
pub mod results;
pub mod roots;
pub mod validation;

pub use engine::StorageEngine;
pub use results::ItemKind;
pub use roots::{RootStore, Visibility};
