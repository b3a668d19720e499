//! Version gate backed by Composer's installed package metadata.

use super::{Version, VersionGate};
use crate::errors::PackageError;
use crate::filesystem::{DirectoryList, FileDriver};
use serde_json::Value;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Package whose version is the platform version.
pub const DEFAULT_PACKAGE: &str = "magento/magento2-base";

/// Resolves the installed platform version from
/// `vendor/composer/installed.json`.
///
/// Both the Composer 1 layout (a top-level array) and the Composer 2 layout
/// (`{"packages": [...]}`) are understood. The version is resolved once per
/// instance.
pub struct ComposerVersionGate {
    file: Arc<dyn FileDriver>,
    directories: DirectoryList,
    package: String,
    resolved: OnceLock<Result<Version, PackageError>>,
}

impl ComposerVersionGate {
    /// Creates a gate for the default platform package.
    #[must_use]
    pub fn new(file: Arc<dyn FileDriver>, directories: DirectoryList) -> Self {
        Self::for_package(file, directories, DEFAULT_PACKAGE)
    }

    /// Creates a gate for a specific package.
    #[must_use]
    pub fn for_package(
        file: Arc<dyn FileDriver>,
        directories: DirectoryList,
        package: impl Into<String>,
    ) -> Self {
        Self {
            file,
            directories,
            package: package.into(),
            resolved: OnceLock::new(),
        }
    }

    fn resolve(&self) -> Result<Version, PackageError> {
        let undefined = || PackageError::Undefined(self.package.clone());
        let path = self.directories.installed_packages();

        if !self.file.is_exists(&path) {
            debug!(path = %path.display(), "Installed package list is missing");
            return Err(undefined());
        }

        let installed = self.file.require_file(&path).map_err(|e| {
            debug!(error = %e, "Installed package list is unreadable");
            undefined()
        })?;

        let packages = match &installed {
            Value::Array(items) => items,
            Value::Object(map) => match map.get("packages") {
                Some(Value::Array(items)) => items,
                _ => return Err(undefined()),
            },
            _ => return Err(undefined()),
        };

        let package = packages
            .iter()
            .find(|p| p.get("name").and_then(Value::as_str) == Some(self.package.as_str()))
            .ok_or_else(undefined)?;

        let version = package
            .get("version")
            .and_then(Value::as_str)
            .ok_or_else(undefined)?;

        version.parse().or_else(|error| {
            package
                .get("version_normalized")
                .and_then(Value::as_str)
                .and_then(|normalized| normalized.parse().ok())
                .ok_or(error)
        })
    }
}

impl std::fmt::Debug for ComposerVersionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposerVersionGate")
            .field("directories", &self.directories)
            .field("package", &self.package)
            .field("resolved", &self.resolved.get())
            .finish_non_exhaustive()
    }
}

impl VersionGate for ComposerVersionGate {
    fn version(&self) -> Result<Version, PackageError> {
        self.resolved.get_or_init(|| self.resolve()).clone()
    }
}
