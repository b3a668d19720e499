//! Static content compression.

use crate::errors::ShellError;
use crate::filesystem::DirectoryList;
use crate::shell::CommandRunner;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// File types worth pre-compressing.
const COMPRESSIBLE_PATTERNS: [&str; 5] = ["*.js", "*.css", "*.svg", "*.html", "*.htm"];

/// Gzips generated static content.
#[cfg_attr(test, mockall::automock)]
pub trait StaticContentCompressor: Send + Sync {
    /// Compresses static content at `level` (`0` disables compression).
    ///
    /// # Errors
    ///
    /// Returns [`ShellError`] if the compression command fails.
    fn process(&self, level: i64, verbose: &str) -> Result<(), ShellError>;
}

/// Compresses static content with one bounded `find | xargs gzip` pipeline.
pub struct ShellCompressor {
    shell: Arc<dyn CommandRunner>,
    target_dir: String,
    timeout_secs: u64,
}

impl ShellCompressor {
    /// Upper bound for the whole compression run.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

    /// Creates a compressor for [`DirectoryList::STATIC_CONTENT`] running
    /// commands through `shell`, which is expected to run from the
    /// application root.
    #[must_use]
    pub fn new(shell: Arc<dyn CommandRunner>) -> Self {
        Self {
            shell,
            target_dir: DirectoryList::STATIC_CONTENT.to_string(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Overrides the directory to compress.
    #[must_use]
    pub fn with_target_dir(mut self, dir: impl Into<String>) -> Self {
        self.target_dir = dir.into();
        self
    }

    /// Overrides the timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Builds the compression command line.
    #[must_use]
    pub fn command(&self, level: i64, verbose: &str) -> String {
        let names = COMPRESSIBLE_PATTERNS
            .iter()
            .map(|pattern| format!("-name '{pattern}'"))
            .collect::<Vec<_>>()
            .join(" -or ");
        let quiet = if verbose.is_empty() { "-q" } else { "-v" };

        format!(
            "timeout -k 30 {timeout} bash -c \"set -o pipefail; find '{dir}' -type f -size +300c '(' {names} ')' -print0 | xargs -0 -n100 -P16 gzip {quiet} --keep -{level}\"",
            timeout = self.timeout_secs,
            dir = self.target_dir,
        )
    }
}

impl std::fmt::Debug for ShellCompressor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellCompressor")
            .field("target_dir", &self.target_dir)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl StaticContentCompressor for ShellCompressor {
    fn process(&self, level: i64, verbose: &str) -> Result<(), ShellError> {
        if level == 0 {
            info!("Static content compression was disabled.");
            return Ok(());
        }

        let clamped = level.clamp(1, 9);
        if clamped != level {
            warn!(level, clamped, "Compression level {} is out of range, using {}", level, clamped);
        }

        let command = self.command(clamped, verbose);
        let started = Instant::now();
        self.shell.execute(&command)?;

        info!(
            command = %command,
            "Static content compression took {:.2} seconds.",
            started.elapsed().as_secs_f64()
        );
        Ok(())
    }
}
