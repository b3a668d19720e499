//! Marker-file flag store.

use super::{Flag, FlagStore};
use crate::errors::FileSystemError;
use chrono::Utc;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Stores each flag as a marker file inside a deployment-scoped directory.
///
/// The directory outlives the build and deploy processes, which is what
/// carries a flag from one phase to the next.
#[derive(Debug, Clone)]
pub struct FileFlagStore {
    dir: PathBuf,
}

impl FileFlagStore {
    /// Creates a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory holding the markers.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, flag: Flag) -> PathBuf {
        self.dir.join(flag.file_name())
    }
}

impl FlagStore for FileFlagStore {
    fn exists(&self, flag: Flag) -> Result<bool, FileSystemError> {
        let path = self.path(flag);
        let exists = path
            .try_exists()
            .map_err(|source| FileSystemError::Read { path, source })?;
        debug!(flag = %flag, exists, "Flag checked");
        Ok(exists)
    }

    fn set(&self, flag: Flag) -> Result<(), FileSystemError> {
        let path = self.path(flag);
        std::fs::create_dir_all(&self.dir).map_err(|source| FileSystemError::Write {
            path: self.dir.clone(),
            source,
        })?;
        std::fs::write(&path, Utc::now().to_rfc3339())
            .map_err(|source| FileSystemError::Write { path, source })?;
        info!(flag = %flag, "Set flag: {}", flag.file_name());
        Ok(())
    }

    fn delete(&self, flag: Flag) -> Result<bool, FileSystemError> {
        let path = self.path(flag);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                info!(flag = %flag, "Deleted flag: {}", flag.file_name());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(FileSystemError::Write { path, source }),
        }
    }
}
