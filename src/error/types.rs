//! Error types
//!
//! Defines domain-specific error types for each module of the shelf server.

use std::fmt;
use std::io;

/// Name validation errors
///
/// Each variant carries a single stable message so API consumers get
/// deterministic 400-class signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    FolderRequired,
    InvalidFolderPath,
    InvalidFolderName,
    FileRequired,
    InvalidFilePath,
    InvalidFileName,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FolderRequired => write!(f, "folder required"),
            ValidationError::InvalidFolderPath => write!(f, "invalid folder path"),
            ValidationError::InvalidFolderName => write!(f, "invalid folder name"),
            ValidationError::FileRequired => write!(f, "file required"),
            ValidationError::InvalidFilePath => write!(f, "invalid file path"),
            ValidationError::InvalidFileName => write!(f, "invalid filename"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Storage engine errors
#[derive(Debug)]
pub enum StorageError {
    Validation(ValidationError),
    FileNotFound(String),
    FolderNotFound(String),
    IoError(io::Error),
}

impl StorageError {
    /// True for errors the boundary reports as 404.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StorageError::FileNotFound(_) | StorageError::FolderNotFound(_)
        )
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Validation(e) => write!(f, "{}", e),
            StorageError::FileNotFound(name) => write!(f, "file not found: {}", name),
            StorageError::FolderNotFound(name) => write!(f, "folder not found: {}", name),
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<ValidationError> for StorageError {
    fn from(error: ValidationError) -> Self {
        StorageError::Validation(error)
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}
