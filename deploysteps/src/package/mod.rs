//! Installed platform version lookup.

mod composer;
mod version;

pub use composer::ComposerVersionGate;
pub use version::Version;

use crate::errors::PackageError;

/// Answers monotonic questions about the installed platform version.
///
/// Gates are passed explicitly to the steps that need them.
#[cfg_attr(test, mockall::automock)]
pub trait VersionGate: Send + Sync {
    /// Returns the installed version.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::Undefined`] if the package cannot be resolved
    /// and [`PackageError::Unparseable`] if its version is not a version.
    fn version(&self) -> Result<Version, PackageError>;

    /// Returns true if the installed version is at least `version`.
    ///
    /// # Errors
    ///
    /// Fails like [`VersionGate::version`], or if `version` cannot be parsed.
    fn is_greater_or_equal(&self, version: &str) -> Result<bool, PackageError> {
        let wanted: Version = version.parse()?;
        Ok(self.version()? >= wanted)
    }

    /// Returns true if the installed version is below `version`.
    ///
    /// # Errors
    ///
    /// Fails like [`VersionGate::is_greater_or_equal`].
    fn is_less_than(&self, version: &str) -> Result<bool, PackageError> {
        self.is_greater_or_equal(version).map(|ge| !ge)
    }
}
