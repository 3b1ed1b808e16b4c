//! Name validation
//!
//! Validates user-supplied folder and file names against an injection-safe
//! grammar before any path is built from them.

use crate::error::ValidationError;

/// True when every byte is in `[A-Za-z0-9_-]` and the string is non-empty.
fn matches_grammar(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// True when the string would escape its parent directory if joined into a
/// path: absolute, containing a separator or `..`, or starting with `.`.
fn escapes_parent(name: &str) -> bool {
    name.starts_with('/')
        || name.starts_with('\\')
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
        || name.starts_with('.')
}

/// Validate a folder name.
///
/// Folders are single path segments matching the grammar exactly.
pub fn validate_folder(folder: &str) -> Result<(), ValidationError> {
    if folder.is_empty() {
        return Err(ValidationError::FolderRequired);
    }
    if escapes_parent(folder) {
        return Err(ValidationError::InvalidFolderPath);
    }
    if !matches_grammar(folder) {
        return Err(ValidationError::InvalidFolderName);
    }
    Ok(())
}

/// Validate a file name.
///
/// Only the portion before the first `.` is grammar-checked; the remainder
/// (extension suffix) is accepted as-is once the whole name has passed the
/// traversal checks. Tightening this would reject names like `a.txt~`, which
/// the current contract accepts.
pub fn validate_filename(filename: &str) -> Result<(), ValidationError> {
    if filename.is_empty() {
        return Err(ValidationError::FileRequired);
    }
    if escapes_parent(filename) {
        return Err(ValidationError::InvalidFilePath);
    }
    let stem = filename.split('.').next().unwrap_or("");
    if !matches_grammar(stem) {
        return Err(ValidationError::InvalidFileName);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_valid_folder_names() {
        for name in ["reports", "a", "A-1_b", "2024", "x_y-z"] {
            assert_eq!(validate_folder(name), Ok(()), "rejected {}", name);
        }
    }

    #[test]
    fn test_empty_folder() {
        assert_eq!(validate_folder(""), Err(ValidationError::FolderRequired));
    }

    #[test]
    fn test_folder_traversal_rejected() {
        for name in ["../etc", "a/b", "/abs", "\\win", "a..b", ".hidden", ".."] {
            assert_eq!(
                validate_folder(name),
                Err(ValidationError::InvalidFolderPath),
                "accepted {}",
                name
            );
        }
    }

    #[test]
    fn test_folder_grammar_rejected() {
        for name in ["a b", "a!", "naïve", "a,b", "a+b"] {
            assert_eq!(
                validate_folder(name),
                Err(ValidationError::InvalidFolderName),
                "accepted {}",
                name
            );
        }
    }

    #[test]
    fn test_valid_filenames() {
        for name in ["a.txt", "report-2024_v2.tar.gz", "README", "x.y"] {
            assert_eq!(validate_filename(name), Ok(()), "rejected {}", name);
        }
    }

    #[test]
    fn test_empty_filename() {
        assert_eq!(validate_filename(""), Err(ValidationError::FileRequired));
    }

    #[test]
    fn test_filename_traversal_rejected() {
        for name in ["../a.txt", "a/b.txt", "/abs.txt", ".env", "..", "a..txt"] {
            assert_eq!(
                validate_filename(name),
                Err(ValidationError::InvalidFilePath),
                "accepted {}",
                name
            );
        }
    }

    #[test]
    fn test_filename_stem_grammar_rejected() {
        for name in ["a b.txt", "a!.txt", "$.txt"] {
            assert_eq!(
                validate_filename(name),
                Err(ValidationError::InvalidFileName),
                "accepted {}",
                name
            );
        }
    }

    #[test]
    fn test_filename_suffix_not_grammar_checked() {
        // Only the stem before the first dot is grammar-checked.
        assert_eq!(validate_filename("a.t x~t"), Ok(()));
    }
}
