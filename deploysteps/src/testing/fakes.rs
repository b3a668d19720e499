//! Hand-written fakes for the command runner, version gate and validators.

use crate::errors::{DeployError, PackageError, ShellError};
use crate::package::{Version, VersionGate};
use crate::shell::CommandRunner;
use crate::validators::{ValidationResult, Validator};
use parking_lot::Mutex;
use std::collections::HashMap;

/// A command runner that records every command and returns canned results.
///
/// Commands succeed with empty output unless a failure was registered for
/// a prefix of the command line.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: Mutex<Vec<String>>,
    failures: HashMap<String, (i32, String)>,
}

impl RecordingRunner {
    /// Creates a runner where every command succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes commands starting with `prefix` fail with `code` and `output`.
    #[must_use]
    pub fn failing(mut self, prefix: impl Into<String>, code: i32, output: impl Into<String>) -> Self {
        self.failures.insert(prefix.into(), (code, output.into()));
        self
    }

    /// Returns the commands run so far, in order.
    #[must_use]
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().clone()
    }

    /// Returns the number of commands run.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.commands.lock().len()
    }
}

impl CommandRunner for RecordingRunner {
    fn execute(&self, command: &str) -> Result<String, ShellError> {
        self.commands.lock().push(command.to_string());

        match self
            .failures
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix.as_str()))
        {
            Some((_, (code, output))) => Err(ShellError::new(command, *code, output.clone())),
            None => Ok(String::new()),
        }
    }
}

/// A version gate answering from a fixed version, or always failing.
#[derive(Debug, Clone)]
pub struct FixedVersionGate {
    version: Result<Version, PackageError>,
}

impl FixedVersionGate {
    /// Creates a gate reporting `version`.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::Unparseable`] if `version` is not a version.
    pub fn new(version: &str) -> Result<Self, PackageError> {
        Ok(Self {
            version: Ok(version.parse()?),
        })
    }

    /// Creates a gate whose package cannot be resolved.
    #[must_use]
    pub fn undefined(package: impl Into<String>) -> Self {
        Self {
            version: Err(PackageError::Undefined(package.into())),
        }
    }
}

impl VersionGate for FixedVersionGate {
    fn version(&self) -> Result<Version, PackageError> {
        self.version.clone()
    }
}

/// A validator returning a canned result and counting its runs.
#[derive(Debug)]
pub struct FixedValidator {
    name: String,
    result: ValidationResult,
    runs: Mutex<usize>,
}

impl FixedValidator {
    /// Creates a validator that always returns `result`.
    #[must_use]
    pub fn new(name: impl Into<String>, result: ValidationResult) -> Self {
        Self {
            name: name.into(),
            result,
            runs: Mutex::new(0),
        }
    }

    /// Creates a validator that always succeeds.
    #[must_use]
    pub fn passing(name: impl Into<String>) -> Self {
        Self::new(name, ValidationResult::success())
    }

    /// Creates a validator that always fails with `message`.
    #[must_use]
    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, ValidationResult::error(message))
    }

    /// Returns how many times the validator ran.
    #[must_use]
    pub fn runs(&self) -> usize {
        *self.runs.lock()
    }
}

impl Validator for FixedValidator {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<ValidationResult, DeployError> {
        *self.runs.lock() += 1;
        Ok(self.result.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_runner() {
        let runner = RecordingRunner::new().failing("remote-storage:enable", 1, "nope");

        assert!(runner.execute("remote-storage:disable").is_ok());
        let error = runner.execute("remote-storage:enable aws-s3").unwrap_err();
        assert_eq!(error.code, 1);
        assert_eq!(
            runner.commands(),
            vec!["remote-storage:disable", "remote-storage:enable aws-s3"]
        );
        assert_eq!(runner.call_count(), 2);
    }

    #[test]
    fn test_fixed_version_gate() {
        let gate = FixedVersionGate::new("2.4.2").unwrap();
        assert!(gate.is_greater_or_equal("2.4.2").unwrap());
        assert!(gate.is_less_than("2.4.3").unwrap());

        let undefined = FixedVersionGate::undefined("magento/magento2-base");
        assert!(matches!(undefined.version(), Err(PackageError::Undefined(_))));
    }

    #[test]
    fn test_fixed_validator_counts_runs() {
        let validator = FixedValidator::failing("structure", "No stores found");
        let result = validator.validate().unwrap();
        assert!(result.is_error());
        assert_eq!(result.message(), Some("No stores found"));
        validator.validate().unwrap();
        assert_eq!(validator.runs(), 2);
    }
}
