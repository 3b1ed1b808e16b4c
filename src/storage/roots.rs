//! Root store
//!
//! Owns the two physical roots backing all storage and the low-level
//! primitives that touch the filesystem. Every primitive is scoped to a
//! single root; `move_between_roots` is the only cross-root mutation.

use log::{error, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// Whether an item is reachable via the public serving path.
///
/// Visibility is encoded by physical location: `Exposed` items live under the
/// public root, `Hidden` items under the private root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Exposed,
    Hidden,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Exposed => "exposed",
            Visibility::Hidden => "hidden",
        }
    }

    /// The opposite visibility state.
    pub fn toggled(&self) -> Visibility {
        match self {
            Visibility::Exposed => Visibility::Hidden,
            Visibility::Hidden => Visibility::Exposed,
        }
    }
}

/// A directory entry for a stored file.
#[derive(Debug, Clone)]
pub struct FileStat {
    pub name: String,
    pub size: u64,
    pub modified: SystemTime,
}

/// Owns the `public/` and `private/` trees and all filesystem primitives.
///
/// Callers must pass pre-validated names; this layer never re-validates.
#[derive(Debug, Clone)]
pub struct RootStore {
    public_root: PathBuf,
    private_root: PathBuf,
}

impl RootStore {
    /// Create a store over `data_root`, creating `public/` and `private/`
    /// beneath it if absent.
    pub fn new(data_root: &Path) -> io::Result<Self> {
        let store = Self {
            public_root: data_root.join("public"),
            private_root: data_root.join("private"),
        };
        fs::create_dir_all(&store.public_root)?;
        fs::create_dir_all(&store.private_root)?;
        info!("Storage roots ready under {}", data_root.display());
        Ok(store)
    }

    /// Physical root directory backing a visibility state.
    pub fn root_path(&self, visibility: Visibility) -> &Path {
        match visibility {
            Visibility::Exposed => &self.public_root,
            Visibility::Hidden => &self.private_root,
        }
    }

    fn item_path(&self, visibility: Visibility, folder: &str, filename: Option<&str>) -> PathBuf {
        let folder_path = self.root_path(visibility).join(folder);
        match filename {
            Some(name) => folder_path.join(name),
            None => folder_path,
        }
    }

    /// Create a folder in one root; idempotent.
    pub fn ensure_folder(&self, visibility: Visibility, folder: &str) -> io::Result<()> {
        fs::create_dir_all(self.item_path(visibility, folder, None))
    }

    /// Write a file into a folder, creating the folder if missing and
    /// overwriting any existing content.
    pub fn write_file(
        &self,
        visibility: Visibility,
        folder: &str,
        filename: &str,
        bytes: &[u8],
    ) -> io::Result<()> {
        self.ensure_folder(visibility, folder)?;
        let path = self.item_path(visibility, folder, Some(filename));
        fs::write(&path, bytes)?;
        info!(
            "Wrote {} bytes to {}/{} ({})",
            bytes.len(),
            folder,
            filename,
            visibility.as_str()
        );
        Ok(())
    }

    /// Check whether a folder (or a file inside it) exists in one root.
    pub fn exists(&self, visibility: Visibility, folder: &str, filename: Option<&str>) -> bool {
        let path = self.item_path(visibility, folder, filename);
        match filename {
            Some(_) => path.is_file(),
            None => path.is_dir(),
        }
    }

    /// List the regular files of a folder, excluding subdirectories.
    pub fn list_files(&self, visibility: Visibility, folder: &str) -> io::Result<Vec<FileStat>> {
        let path = self.item_path(visibility, folder, None);
        let mut files = vec![];
        for entry in fs::read_dir(&path)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            files.push(FileStat {
                name: entry.file_name().to_string_lossy().to_string(),
                size: metadata.len(),
                modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            });
        }
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    /// List the top-level folder names of one root, directories only.
    pub fn list_top_level(&self, visibility: Visibility) -> io::Result<Vec<String>> {
        let mut folders = vec![];
        for entry in fs::read_dir(self.root_path(visibility))? {
            let entry = entry?;
            if entry.metadata()?.is_dir() {
                folders.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        folders.sort();
        Ok(folders)
    }

    /// Remove a file, or a folder and its contents recursively, from one
    /// root. Succeeds as a no-op when the item is already absent.
    pub fn remove(
        &self,
        visibility: Visibility,
        folder: &str,
        filename: Option<&str>,
    ) -> io::Result<()> {
        let path = self.item_path(visibility, folder, filename);
        let result = match filename {
            Some(_) if path.is_file() => fs::remove_file(&path),
            None if path.is_dir() => fs::remove_dir_all(&path),
            _ => return Ok(()),
        };
        match result {
            Ok(()) => {
                info!("Removed {} from {} root", folder, visibility.as_str());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                error!("Failed to remove item in {} root: {}", visibility.as_str(), e);
                Err(e)
            }
        }
    }

    /// Relocate an item from one root to the other, overwriting any
    /// conflicting item already at the destination.
    ///
    /// Not atomic with respect to concurrent readers: between the removal of
    /// the destination conflict and the rename, the item exists only at the
    /// source; during the rename it may briefly be observable in neither
    /// root. Callers serialize these transitions per folder.
    pub fn move_between_roots(
        &self,
        from: Visibility,
        to: Visibility,
        folder: &str,
        filename: Option<&str>,
    ) -> io::Result<()> {
        let source = self.item_path(from, folder, filename);
        let target = self.item_path(to, folder, filename);
        if filename.is_some() {
            // A file moves into the counterpart folder, which may not exist yet.
            self.ensure_folder(to, folder)?;
        }
        self.remove(to, folder, filename)?;
        fs::rename(&source, &target)?;
        info!(
            "Moved {}{} from {} to {} root",
            folder,
            filename.map(|f| format!("/{}", f)).unwrap_or_default(),
            from.as_str(),
            to.as_str()
        );
        Ok(())
    }

    /// Rename an item within a single root, overwriting any conflicting item
    /// already carrying the new name.
    pub fn rename_in_root(
        &self,
        visibility: Visibility,
        folder: &str,
        filename: Option<&str>,
        new_name: &str,
    ) -> io::Result<()> {
        let (source, target) = match filename {
            Some(name) => (
                self.item_path(visibility, folder, Some(name)),
                self.item_path(visibility, folder, Some(new_name)),
            ),
            None => (
                self.item_path(visibility, folder, None),
                self.root_path(visibility).join(new_name),
            ),
        };
        match filename {
            Some(_) => self.remove(visibility, folder, Some(new_name))?,
            None => self.remove(visibility, new_name, None)?,
        }
        fs::rename(&source, &target)?;
        Ok(())
    }
}
