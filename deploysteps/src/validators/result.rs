//! Validation result type with factory methods.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a validation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The check passed.
    Success,
    /// The check found a problem.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// The outcome of a single validator run.
///
/// `ValidationResult` is immutable once created. An error result always
/// carries a message; a success result never carries one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
}

impl ValidationResult {
    /// Creates a success result.
    #[must_use]
    pub fn success() -> Self {
        Self {
            severity: Severity::Success,
            message: None,
            suggestion: None,
        }
    }

    /// Creates an error result with a message.
    ///
    /// An empty message is replaced by a generic one.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            "Validation failed".to_string()
        } else {
            message
        };

        Self {
            severity: Severity::Error,
            message: Some(message),
            suggestion: None,
        }
    }

    /// Attaches remediation text to an error result.
    ///
    /// Suggestions are ignored on success results.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        if self.severity == Severity::Error {
            let suggestion = suggestion.into();
            if !suggestion.is_empty() {
                self.suggestion = Some(suggestion);
            }
        }
        self
    }

    /// Returns the severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the error message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the remediation suggestion, if any.
    #[must_use]
    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    /// Returns true if the check passed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.severity == Severity::Success
    }

    /// Returns true if the check found a problem.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.message, &self.suggestion) {
            (None, _) => write!(f, "{}", self.severity),
            (Some(message), None) => write!(f, "{message}"),
            (Some(message), Some(suggestion)) => write!(f, "{message}\n{suggestion}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_success_has_no_message() {
        let result = ValidationResult::success();
        assert!(result.is_success());
        assert_eq!(result.message(), None);
        assert_eq!(result.suggestion(), None);
    }

    #[test]
    fn test_error_carries_message_and_suggestion() {
        let result = ValidationResult::error("Missing stores").with_suggestion("Run config:dump");
        assert!(result.is_error());
        assert_eq!(result.message(), Some("Missing stores"));
        assert_eq!(result.suggestion(), Some("Run config:dump"));
        assert_eq!(result.to_string(), "Missing stores\nRun config:dump");
    }

    #[test]
    fn test_error_never_has_empty_message() {
        let result = ValidationResult::error("  ");
        assert_eq!(result.message(), Some("Validation failed"));
    }

    #[test]
    fn test_suggestion_ignored_on_success() {
        let result = ValidationResult::success().with_suggestion("ignored");
        assert_eq!(result.suggestion(), None);
    }

    #[test]
    fn test_result_serialize() {
        let json = serde_json::to_string(&ValidationResult::error("boom")).unwrap();
        assert_eq!(json, r#"{"severity":"error","message":"boom"}"#);
    }
}
