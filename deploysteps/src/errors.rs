//! Error types for deploysteps.
//!
//! Failures fall into four families:
//!
//! - validation problems are *returned* as an error-level
//!   [`ValidationResult`](crate::validators::ValidationResult), never raised;
//! - dependency failures ([`PackageError`], [`FileSystemError`],
//!   [`ConfigError`]) are raised and halt the phase;
//! - command failures ([`ShellError`]) are raised unless the calling step
//!   treats the command as best-effort;
//! - [`StepError`] is what a step hands back to the pipeline, carrying the
//!   original message and code unmodified.

use std::path::PathBuf;
use thiserror::Error;

/// Numeric error codes surfaced alongside messages.
///
/// Shell failures report the process exit status instead.
pub mod codes {
    /// Generic failure without a more specific code.
    pub const GENERIC: i32 = 1;
    /// The installed platform package could not be resolved.
    pub const UNDEFINED_PACKAGE: i32 = 10;
    /// A version string could not be parsed.
    pub const UNPARSEABLE_VERSION: i32 = 11;
    /// A file could not be read, written or parsed.
    pub const FILE_SYSTEM: i32 = 20;
    /// A configuration value is malformed.
    pub const CONFIG: i32 = 30;
    /// Critical validators reported errors.
    pub const VALIDATION: i32 = 40;
    /// The command could not be spawned at all.
    pub const SHELL_SPAWN: i32 = -1;
}

/// The umbrella error type for deploysteps operations.
#[derive(Debug, Error)]
pub enum DeployError {
    /// A file could not be read or parsed.
    #[error(transparent)]
    FileSystem(#[from] FileSystemError),

    /// A configuration value is malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The installed package version could not be resolved.
    #[error(transparent)]
    Package(#[from] PackageError),

    /// An external command failed.
    #[error(transparent)]
    Shell(#[from] ShellError),

    /// A step failed.
    #[error(transparent)]
    Step(#[from] StepError),

    /// One or more critical validators returned an error result.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl DeployError {
    /// Returns the numeric code of the underlying failure.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::FileSystem(_) => codes::FILE_SYSTEM,
            Self::Config(_) => codes::CONFIG,
            Self::Package(e) => e.code(),
            Self::Shell(e) => e.code,
            Self::Step(e) => e.code,
            Self::Validation(_) => codes::VALIDATION,
        }
    }
}

/// Error raised when a file cannot be read or its structure is malformed.
#[derive(Debug, Error)]
pub enum FileSystemError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file could not be written or removed.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        /// Path of the file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file was read but its content has an unexpected structure.
    #[error("Malformed content in {}: {reason}", .path.display())]
    Malformed {
        /// Path of the file.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },
}

impl FileSystemError {
    /// Creates a malformed-content error.
    #[must_use]
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Error raised when a configuration value cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value for {key}: {reason}")]
pub struct ConfigError {
    /// The configuration key.
    pub key: String,
    /// Why the value was rejected.
    pub reason: String,
}

impl ConfigError {
    /// Creates a new config error.
    #[must_use]
    pub fn new(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Error raised by the version gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackageError {
    /// The package is not installed or its metadata is unavailable.
    #[error("Package {0} is not defined")]
    Undefined(String),

    /// A version string is not a recognizable version.
    #[error("Version '{0}' cannot be parsed")]
    Unparseable(String),
}

impl PackageError {
    /// Returns the numeric error code.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Undefined(_) => codes::UNDEFINED_PACKAGE,
            Self::Unparseable(_) => codes::UNPARSEABLE_VERSION,
        }
    }
}

/// Error raised when an external command exits with a non-zero status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Command {command} returned code {code}{}", render_output(.output))]
pub struct ShellError {
    /// The command line that was run, credential values masked.
    pub command: String,
    /// Exit status, or [`codes::SHELL_SPAWN`] if the process never started.
    pub code: i32,
    /// Captured stderr/stdout.
    pub output: String,
}

impl ShellError {
    /// Creates a new shell error. Credential option values in `command` are
    /// masked.
    #[must_use]
    pub fn new(command: impl AsRef<str>, code: i32, output: impl Into<String>) -> Self {
        Self {
            command: crate::shell::redact(command.as_ref()),
            code,
            output: output.into(),
        }
    }
}

fn render_output(output: &str) -> String {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

/// Error raised when a step cannot complete.
///
/// The message and code of the wrapped failure are kept verbatim so operators
/// can diagnose against the platform's own error vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StepError {
    /// The original message.
    pub message: String,
    /// The original code.
    pub code: i32,
}

impl StepError {
    /// Creates a new step error.
    #[must_use]
    pub fn new(message: impl Into<String>, code: i32) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }
}

impl From<PackageError> for StepError {
    fn from(error: PackageError) -> Self {
        Self::new(error.to_string(), error.code())
    }
}

impl From<ShellError> for StepError {
    fn from(error: ShellError) -> Self {
        Self::new(error.to_string(), error.code)
    }
}

impl From<DeployError> for StepError {
    fn from(error: DeployError) -> Self {
        match error {
            DeployError::Step(inner) => inner,
            other => Self::new(other.to_string(), other.code()),
        }
    }
}

impl From<FileSystemError> for StepError {
    fn from(error: FileSystemError) -> Self {
        DeployError::from(error).into()
    }
}

impl From<ConfigError> for StepError {
    fn from(error: ConfigError) -> Self {
        DeployError::from(error).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_error_message_includes_output() {
        let error = ShellError::new("php ./bin/magento remote-storage:enable", 2, "  bad adapter\n");
        assert_eq!(
            error.to_string(),
            "Command php ./bin/magento remote-storage:enable returned code 2: bad adapter"
        );
    }

    #[test]
    fn test_shell_error_message_without_output() {
        let error = ShellError::new("true", 1, "");
        assert_eq!(error.to_string(), "Command true returned code 1");
    }

    #[test]
    fn test_shell_error_masks_credentials() {
        let error = ShellError::new(
            "php ./bin/magento remote-storage:enable aws-s3 b r p --access-key=AK --secret-key=SK",
            1,
            "",
        );
        assert_eq!(
            error.command,
            "php ./bin/magento remote-storage:enable aws-s3 b r p --access-key=****** --secret-key=******"
        );
        assert!(!StepError::from(error).message.contains("SK"));
    }

    #[test]
    fn test_step_error_preserves_package_error() {
        let error = StepError::from(PackageError::Undefined("magento/magento2-base".into()));
        assert_eq!(error.message, "Package magento/magento2-base is not defined");
        assert_eq!(error.code, codes::UNDEFINED_PACKAGE);
    }

    #[test]
    fn test_step_error_preserves_shell_exit_code() {
        let error = StepError::from(ShellError::new("cmd", 127, "not found"));
        assert_eq!(error.code, 127);
        assert!(error.to_string().contains("not found"));
    }

    #[test]
    fn test_step_error_unwraps_nested_step_error() {
        let inner = StepError::new("inner failure", 42);
        let error = StepError::from(DeployError::Step(inner.clone()));
        assert_eq!(error, inner);
    }

    #[test]
    fn test_deploy_error_codes() {
        let config = DeployError::from(ConfigError::new("SKIP_SCD", "expected a boolean"));
        assert_eq!(config.code(), codes::CONFIG);
        assert_eq!(config.to_string(), "Invalid value for SKIP_SCD: expected a boolean");

        let validation = DeployError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(validation.code(), codes::VALIDATION);
        assert_eq!(validation.to_string(), "Validation failed: a; b");
    }
}
