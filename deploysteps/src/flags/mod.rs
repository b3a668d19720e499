//! Deployment flags: durable markers coordinating the build and deploy
//! phases.
//!
//! Exactly one step writes a given flag within a phase and later phases only
//! read (or clear) it, so the store needs no locking protocol.

mod file;
mod memory;

pub use file::FileFlagStore;
pub use memory::MemoryFlagStore;

use crate::errors::FileSystemError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed vocabulary of deployment flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Flag {
    /// Static content generation was postponed past the deploy phase.
    StaticContentDeployPending,
    /// Static content was generated during the build phase.
    StaticContentDeployInBuild,
}

impl Flag {
    /// Every known flag.
    pub const ALL: [Self; 2] = [Self::StaticContentDeployPending, Self::StaticContentDeployInBuild];

    /// Returns the well-known flag name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::StaticContentDeployPending => "static-content-deploy-pending",
            Self::StaticContentDeployInBuild => "static-content-deploy-in-build",
        }
    }

    /// Returns the marker file name used by file-backed stores.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::StaticContentDeployPending => ".static_content_deploy_pending",
            Self::StaticContentDeployInBuild => ".static_content_deploy",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Persisted boolean markers scoped to one deployment.
#[cfg_attr(test, mockall::automock)]
pub trait FlagStore: Send + Sync {
    /// Returns true if the flag is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be inspected.
    fn exists(&self, flag: Flag) -> Result<bool, FileSystemError>;

    /// Sets the flag. Setting an already set flag is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, flag: Flag) -> Result<(), FileSystemError>;

    /// Clears the flag and reports whether it was set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn delete(&self, flag: Flag) -> Result<bool, FileSystemError>;
}

/// Clears every known flag, as done at the start of a new deployment.
///
/// # Errors
///
/// Returns the first storage error encountered.
pub fn reset_flags(store: &dyn FlagStore) -> Result<(), FileSystemError> {
    for flag in Flag::ALL {
        store.delete(flag)?;
    }
    Ok(())
}
