//! Item resolution
//!
//! Decides which root currently holds a logical path. Every operation that
//! needs an existence answer goes through here so the precedence rule lives
//! in exactly one place.

use crate::storage::roots::{RootStore, Visibility};

/// Where a stored item currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub visibility: Visibility,
    /// True when a stale copy also exists in the losing root.
    pub duplicated: bool,
}

/// Resolve a folder (or a file inside it) to the root that holds it.
///
/// Probes the exposed root first. When the item exists in both roots the
/// exposed copy wins; this is the canonical tie-break for every
/// ambiguous-existence case in the system.
pub fn resolve(store: &RootStore, folder: &str, filename: Option<&str>) -> Option<Resolved> {
    let in_exposed = store.exists(Visibility::Exposed, folder, filename);
    let in_hidden = store.exists(Visibility::Hidden, folder, filename);
    match (in_exposed, in_hidden) {
        (true, dup) => Some(Resolved {
            visibility: Visibility::Exposed,
            duplicated: dup,
        }),
        (false, true) => Some(Resolved {
            visibility: Visibility::Hidden,
            duplicated: false,
        }),
        (false, false) => None,
    }
}
