//! Checks that the exported application configuration lists stores and
//! websites, which static content generation at build time depends on.

use super::{ValidationResult, Validator};
use crate::config::FlatConfig;
use crate::errors::{DeployError, FileSystemError};
use crate::filesystem::{DirectoryList, FileDriver};
use std::sync::Arc;

const WEBSITES_PATH: &str = "scopes/websites";
const STORES_PATH: &str = "scopes/stores";

/// Validates that the config file holds enough data to generate static
/// content during the build phase.
pub struct ConfigFileStructure {
    file: Arc<dyn FileDriver>,
    directories: DirectoryList,
}

impl ConfigFileStructure {
    /// Creates a new validator.
    #[must_use]
    pub fn new(file: Arc<dyn FileDriver>, directories: DirectoryList) -> Self {
        Self { file, directories }
    }

    fn suggestion() -> String {
        [
            "To speed up the deploy process, please run the following commands:",
            "1. php ./vendor/bin/ece-tools config:dump",
            "2. git add -f app/etc/config.json",
            "3. git commit -m 'Updating config.json'",
            "4. git push",
        ]
        .join("\n")
    }
}

impl std::fmt::Debug for ConfigFileStructure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigFileStructure")
            .field("directories", &self.directories)
            .finish_non_exhaustive()
    }
}

impl Validator for ConfigFileStructure {
    fn name(&self) -> &str {
        "config-file-structure"
    }

    fn validate(&self) -> Result<ValidationResult, DeployError> {
        let path = self.directories.config_file();
        let config = self.file.require_file(&path)?;

        if !config.is_object() {
            return Err(FileSystemError::malformed(path, "expected a configuration object").into());
        }

        let flattened = FlatConfig::flatten(&config);
        let websites = flattened.filter_prefix(WEBSITES_PATH);
        let stores = flattened.filter_prefix(STORES_PATH);

        if websites.is_empty() && stores.is_empty() {
            return Ok(ValidationResult::error("No stores/website/locales found in config.json")
                .with_suggestion(Self::suggestion()));
        }

        Ok(ValidationResult::success())
    }
}
