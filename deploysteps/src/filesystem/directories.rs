//! Well-known locations relative to the application root.

use std::path::{Path, PathBuf};

/// Resolves paths inside the deployed application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryList {
    root: PathBuf,
}

impl DirectoryList {
    /// Exported application configuration, relative to the root.
    pub const CONFIG_FILE: &'static str = "app/etc/config.json";
    /// Composer's installed package metadata, relative to the root.
    pub const INSTALLED_PACKAGES: &'static str = "vendor/composer/installed.json";
    /// Generated static content, relative to the root.
    pub const STATIC_CONTENT: &'static str = "pub/static";
    /// Stage configuration file, relative to the root.
    pub const ENV_CONFIG_FILE: &'static str = ".deploy.env.json";

    /// Creates a directory list rooted at the application directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the application root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the exported application configuration.
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.root.join(Self::CONFIG_FILE)
    }

    /// Returns the path of Composer's installed package list.
    #[must_use]
    pub fn installed_packages(&self) -> PathBuf {
        self.root.join(Self::INSTALLED_PACKAGES)
    }

    /// Returns the path of the stage configuration file.
    #[must_use]
    pub fn env_config_file(&self) -> PathBuf {
        self.root.join(Self::ENV_CONFIG_FILE)
    }

    /// Returns the directory holding deployment flags.
    #[must_use]
    pub fn flags_dir(&self) -> PathBuf {
        self.root.join("var")
    }
}
