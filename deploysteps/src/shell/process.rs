//! Runs command lines through the system shell.

use super::{redact, CommandRunner};
use crate::errors::{codes, ShellError};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Runs commands with `sh -c` in a fixed working directory.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    working_dir: Option<PathBuf>,
}

impl ProcessRunner {
    /// Creates a runner using the current working directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs commands from the given directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl CommandRunner for ProcessRunner {
    fn execute(&self, command: &str) -> Result<String, ShellError> {
        debug!(command = %redact(command), "Running command");

        let mut process = Command::new("sh");
        process.arg("-c").arg(command);
        if let Some(ref dir) = self.working_dir {
            process.current_dir(dir);
        }

        let output = process
            .output()
            .map_err(|e| ShellError::new(command, codes::SHELL_SPAWN, e.to_string()))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if output.status.success() {
            return Ok(stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let captured = [stdout.trim(), stderr.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        Err(ShellError::new(
            command,
            output.status.code().unwrap_or(codes::GENERIC),
            captured,
        ))
    }
}
