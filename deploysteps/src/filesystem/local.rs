//! Local JSON file driver.

use super::FileDriver;
use crate::errors::FileSystemError;
use std::path::Path;

/// Reads JSON files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileDriver;

impl LocalFileDriver {
    /// Creates a new driver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FileDriver for LocalFileDriver {
    fn require_file(&self, path: &Path) -> Result<serde_json::Value, FileSystemError> {
        let content = std::fs::read_to_string(path).map_err(|source| FileSystemError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content)
            .map_err(|e| FileSystemError::malformed(path, e.to_string()))
    }

    fn is_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
