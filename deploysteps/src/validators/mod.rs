//! Validators: read-only checks producing a [`ValidationResult`].
//!
//! A validator never raises for an expected configuration problem; it returns
//! an error-level result with concrete remediation steps instead. Only
//! tooling faults (unreadable or malformed files) surface as `Err`.

mod config_file_structure;
mod result;

pub use config_file_structure::ConfigFileStructure;
pub use result::{Severity, ValidationResult};

use crate::errors::DeployError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trait for validators.
pub trait Validator: Send + Sync {
    /// Returns the name of the validator.
    fn name(&self) -> &str;

    /// Runs the check.
    ///
    /// # Errors
    ///
    /// Returns an error only for unexpected faults such as an unreadable
    /// file; invalid configuration is reported through the result.
    fn validate(&self) -> Result<ValidationResult, DeployError>;
}

/// How seriously a pipeline treats a validator's error result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorLevel {
    /// An error result halts the phase.
    Critical,
    /// An error result is logged and the phase continues.
    Warning,
}

impl fmt::Display for ValidatorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::Warning => write!(f, "warning"),
        }
    }
}
