//! Storage result types
//!
//! Defines result records returned by engine operations. Each record carries
//! the resolved visibility and constructed URL so the boundary layer can
//! populate its response envelope without touching the filesystem.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::roots::{FileStat, Visibility};

/// A file within a folder listing.
#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    pub modified: String,
}

impl From<FileStat> for FileEntry {
    fn from(stat: FileStat) -> Self {
        let modified: DateTime<Utc> = stat.modified.into();
        Self {
            name: stat.name,
            size: stat.size,
            modified: modified.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Result of creating a folder.
#[derive(Debug, Clone, Serialize)]
pub struct FolderCreated {
    pub folder: String,
    pub visibility: Visibility,
    pub url: Option<String>,
}

/// Result of storing a file.
#[derive(Debug, Clone, Serialize)]
pub struct FileStored {
    pub folder: String,
    pub file: String,
    pub visibility: Visibility,
    pub url: Option<String>,
}

/// What a delete operation removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Folder,
}

/// Result of a delete operation.
#[derive(Debug, Clone, Serialize)]
pub struct Deleted {
    #[serde(rename = "deletedKind")]
    pub deleted_kind: ItemKind,
}

/// Result of a rename operation.
#[derive(Debug, Clone, Serialize)]
pub struct Renamed {
    pub folder: String,
    pub file: Option<String>,
    pub visibility: Visibility,
    pub url: Option<String>,
}

/// Result of an expose or unexpose operation.
#[derive(Debug, Clone, Serialize)]
pub struct VisibilityChanged {
    pub folder: String,
    pub visibility: Visibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Result of listing one folder.
#[derive(Debug, Clone, Serialize)]
pub struct FolderListing {
    pub folder: String,
    pub visibility: Visibility,
    pub url: Option<String>,
    pub files: Vec<FileEntry>,
}

/// One entry of the root listing.
#[derive(Debug, Clone, Serialize)]
pub struct RootEntry {
    pub name: String,
    pub visibility: Visibility,
    pub url: Option<String>,
}

/// Result of listing the root.
#[derive(Debug, Clone, Serialize)]
pub struct RootListing {
    pub folders: Vec<RootEntry>,
}
