//! Storage engine
//!
//! Composes validation, resolution, and the root store into the seven
//! logical operations of the server. Mutations on the same folder are
//! serialized through a per-folder lock so cross-root transitions happen in
//! a total order per logical path.

use log::info;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::{StorageError, ValidationError};
use crate::storage::resolver::resolve;
use crate::storage::results::{
    Deleted, FileStored, FolderCreated, FolderListing, ItemKind, Renamed, RootEntry, RootListing,
    VisibilityChanged,
};
use crate::storage::roots::{RootStore, Visibility};
use crate::storage::validation::{validate_filename, validate_folder};

/// Per-folder locks keyed by folder name.
///
/// Entries are created on first use and kept for the process lifetime; the
/// folder namespace is flat and small enough that reaping is not worth it.
#[derive(Debug, Default)]
struct FolderLocks {
    inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl FolderLocks {
    fn acquire(&self, folder: &str) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(map.entry(folder.to_string()).or_default())
    }
}

/// The storage engine behind every HTTP action.
#[derive(Debug)]
pub struct StorageEngine {
    store: RootStore,
    base_url: String,
    locks: FolderLocks,
}

impl StorageEngine {
    pub fn new(store: RootStore, base_url: &str) -> Self {
        Self {
            store,
            base_url: base_url.trim_end_matches('/').to_string(),
            locks: FolderLocks::default(),
        }
    }

    /// Public URL of an item, or None when it is hidden.
    fn url_for(&self, visibility: Visibility, folder: &str, filename: Option<&str>) -> Option<String> {
        match visibility {
            Visibility::Hidden => None,
            Visibility::Exposed => Some(match filename {
                Some(name) => format!("{}/public/{}/{}", self.base_url, folder, name),
                None => format!("{}/public/{}/", self.base_url, folder),
            }),
        }
    }

    fn requested_visibility(expose: bool) -> Visibility {
        if expose {
            Visibility::Exposed
        } else {
            Visibility::Hidden
        }
    }

    /// Create a folder in the root matching the expose flag; idempotent.
    pub fn create_folder(&self, folder: &str, expose: bool) -> Result<FolderCreated, StorageError> {
        validate_folder(folder)?;
        let visibility = Self::requested_visibility(expose);
        let lock = self.locks.acquire(folder);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        self.store.ensure_folder(visibility, folder)?;
        info!("Created folder {} ({})", folder, visibility.as_str());
        Ok(FolderCreated {
            folder: folder.to_string(),
            visibility,
            url: self.url_for(visibility, folder, None),
        })
    }

    /// Store a file in the root matching the expose flag, overwriting any
    /// existing file of the same name.
    pub fn store_file(
        &self,
        folder: &str,
        filename: &str,
        bytes: &[u8],
        expose: bool,
    ) -> Result<FileStored, StorageError> {
        validate_folder(folder)?;
        validate_filename(filename)?;
        let visibility = Self::requested_visibility(expose);
        let lock = self.locks.acquire(folder);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        self.store.write_file(visibility, folder, filename, bytes)?;
        Ok(FileStored {
            folder: folder.to_string(),
            file: filename.to_string(),
            visibility,
            url: self.url_for(visibility, folder, Some(filename)),
        })
    }

    /// Delete a file or a whole folder from whichever root(s) hold it.
    ///
    /// Removal covers both roots so a stale duplicate never survives a
    /// delete. NotFound only when the item is absent from both.
    pub fn delete(&self, folder: &str, filename: Option<&str>) -> Result<Deleted, StorageError> {
        validate_folder(folder)?;
        if let Some(name) = filename {
            validate_filename(name)?;
        }
        let lock = self.locks.acquire(folder);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        if resolve(&self.store, folder, filename).is_none() {
            return Err(not_found(folder, filename));
        }
        self.store.remove(Visibility::Exposed, folder, filename)?;
        self.store.remove(Visibility::Hidden, folder, filename)?;
        Ok(Deleted {
            deleted_kind: match filename {
                Some(_) => ItemKind::File,
                None => ItemKind::Folder,
            },
        })
    }

    /// Rename a file or folder within the root it currently occupies.
    ///
    /// Visibility is never changed by a rename; a conflicting item already
    /// carrying the new name is overwritten.
    pub fn rename(
        &self,
        kind: ItemKind,
        folder: &str,
        filename: Option<&str>,
        new_name: &str,
    ) -> Result<Renamed, StorageError> {
        validate_folder(folder)?;
        let filename = match kind {
            ItemKind::File => {
                let name = filename.ok_or(ValidationError::FileRequired)?;
                validate_filename(name)?;
                validate_filename(new_name)?;
                Some(name)
            }
            ItemKind::Folder => {
                validate_folder(new_name)?;
                None
            }
        };
        let lock = self.locks.acquire(folder);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        let resolved =
            resolve(&self.store, folder, filename).ok_or_else(|| not_found(folder, filename))?;
        self.store
            .rename_in_root(resolved.visibility, folder, filename, new_name)?;
        let (folder_after, file_after) = match kind {
            ItemKind::File => (folder.to_string(), Some(new_name.to_string())),
            ItemKind::Folder => (new_name.to_string(), None),
        };
        info!(
            "Renamed {:?} {} to {} ({})",
            kind,
            folder,
            new_name,
            resolved.visibility.as_str()
        );
        Ok(Renamed {
            url: self.url_for(resolved.visibility, &folder_after, file_after.as_deref()),
            folder: folder_after,
            file: file_after,
            visibility: resolved.visibility,
        })
    }

    /// Move a folder to the exposed root; no-op success when already there.
    pub fn expose(&self, folder: &str) -> Result<VisibilityChanged, StorageError> {
        self.transition(folder, Visibility::Exposed)
    }

    /// Move a folder to the hidden root; no-op success when already there.
    pub fn unexpose(&self, folder: &str) -> Result<VisibilityChanged, StorageError> {
        self.transition(folder, Visibility::Hidden)
    }

    fn transition(
        &self,
        folder: &str,
        target: Visibility,
    ) -> Result<VisibilityChanged, StorageError> {
        validate_folder(folder)?;
        let lock = self.locks.acquire(folder);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        let resolved =
            resolve(&self.store, folder, None).ok_or_else(|| not_found(folder, None))?;
        if resolved.visibility != target {
            self.store
                .move_between_roots(target.toggled(), target, folder, None)?;
            info!("Folder {} is now {}", folder, target.as_str());
        }
        Ok(VisibilityChanged {
            folder: folder.to_string(),
            visibility: target,
            url: self.url_for(target, folder, None),
        })
    }

    /// List the files of a folder from the root that holds it.
    pub fn list_folder(&self, folder: &str) -> Result<FolderListing, StorageError> {
        validate_folder(folder)?;
        let resolved =
            resolve(&self.store, folder, None).ok_or_else(|| not_found(folder, None))?;
        let files = self
            .store
            .list_files(resolved.visibility, folder)?
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(FolderListing {
            folder: folder.to_string(),
            visibility: resolved.visibility,
            url: self.url_for(resolved.visibility, folder, None),
            files,
        })
    }

    /// List the top-level folders of both roots, deduplicated by name with
    /// exposed entries taking precedence.
    pub fn list_root(&self) -> Result<RootListing, StorageError> {
        let mut folders: Vec<RootEntry> = self
            .store
            .list_top_level(Visibility::Exposed)?
            .into_iter()
            .map(|name| RootEntry {
                url: self.url_for(Visibility::Exposed, &name, None),
                name,
                visibility: Visibility::Exposed,
            })
            .collect();
        for name in self.store.list_top_level(Visibility::Hidden)? {
            if !folders.iter().any(|entry| entry.name == name) {
                folders.push(RootEntry {
                    name,
                    visibility: Visibility::Hidden,
                    url: None,
                });
            }
        }
        folders.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(RootListing { folders })
    }
}

fn not_found(folder: &str, filename: Option<&str>) -> StorageError {
    match filename {
        Some(name) => StorageError::FileNotFound(name.to_string()),
        None => StorageError::FolderNotFound(folder.to_string()),
    }
}
