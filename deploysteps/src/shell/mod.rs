//! Command runners: the only I/O boundary to the platform being deployed.
//!
//! Every invocation is a single blocking attempt. Timeouts and retries are
//! not handled here; a command that must be bounded carries its own
//! `timeout` wrapper.

mod platform;
mod process;
mod quote;

pub use platform::PlatformShell;
pub use process::ProcessRunner;
pub use quote::{quote, redact, MASK};

use crate::errors::ShellError;

/// Executes a command line and returns its captured output.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Runs `command` to completion.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError`] carrying the exit status and captured output
    /// if the command exits non-zero or cannot be started.
    fn execute(&self, command: &str) -> Result<String, ShellError>;
}
