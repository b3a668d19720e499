//! Filesystem access for validators and configuration loading.

mod directories;
mod local;

pub use directories::DirectoryList;
pub use local::LocalFileDriver;

use crate::errors::FileSystemError;
use std::path::Path;

/// Reads structured data from disk.
#[cfg_attr(test, mockall::automock)]
pub trait FileDriver: Send + Sync {
    /// Reads and parses a structured file.
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError::Read`] if the file cannot be read and
    /// [`FileSystemError::Malformed`] if it cannot be parsed.
    fn require_file(&self, path: &Path) -> Result<serde_json::Value, FileSystemError>;

    /// Returns true if the path exists.
    fn is_exists(&self, path: &Path) -> bool;
}
