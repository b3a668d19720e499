//! Runner for the platform's own CLI.

use super::CommandRunner;
use crate::errors::ShellError;
use std::sync::Arc;

/// Default CLI entry point of the platform.
pub const DEFAULT_ENTRY_POINT: &str = "php ./bin/magento";

/// Prefixes commands with the platform CLI entry point and appends the
/// non-interactive switches and configured verbosity.
///
/// Steps hand it the bare command name and arguments, e.g.
/// `remote-storage:disable`.
pub struct PlatformShell {
    runner: Arc<dyn CommandRunner>,
    entry_point: String,
    verbosity: String,
}

impl PlatformShell {
    /// Creates a platform shell over `runner`.
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            verbosity: String::new(),
        }
    }

    /// Overrides the CLI entry point.
    #[must_use]
    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = entry_point.into();
        self
    }

    /// Sets the verbosity switch (`-v`, `-vv`, `-vvv` or empty).
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: impl Into<String>) -> Self {
        self.verbosity = verbosity.into();
        self
    }

    fn command_line(&self, command: &str) -> String {
        let mut line = format!("{} {} --ansi --no-interaction", self.entry_point, command.trim());
        if !self.verbosity.is_empty() {
            line.push(' ');
            line.push_str(&self.verbosity);
        }
        line
    }
}

impl std::fmt::Debug for PlatformShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformShell")
            .field("entry_point", &self.entry_point)
            .field("verbosity", &self.verbosity)
            .finish_non_exhaustive()
    }
}

impl CommandRunner for PlatformShell {
    fn execute(&self, command: &str) -> Result<String, ShellError> {
        self.runner.execute(&self.command_line(command))
    }
}
