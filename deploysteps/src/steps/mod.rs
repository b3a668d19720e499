//! Step trait and concrete deployment steps.
//!
//! Steps are the side-effecting units of a deployment phase. A step either
//! completes (`Ok(())`) or fails with a [`StepError`]; skipping is a
//! successful completion that is only visible in the logs.

mod compress_static_content;
mod remote_storage;
mod static_content_deploy;

pub use compress_static_content::{CompressBuildStaticContent, CompressStaticContent};
pub use remote_storage::RemoteStorage;
pub use static_content_deploy::{BuildStaticContentDeploy, DeployStaticContent};

use crate::errors::{ShellError, StepError};
use thiserror::Error;

/// Trait for deployment steps.
///
/// Steps are idempotent: running one again after it completed must not
/// change the outcome.
pub trait Step: Send + Sync {
    /// Returns the name of the step.
    fn name(&self) -> &str;

    /// Executes the step.
    ///
    /// # Errors
    ///
    /// Returns [`StepError`] carrying the original message and code of the
    /// failure that stopped the step.
    fn execute(&self) -> Result<(), StepError>;
}

/// Failure of a best-effort action.
///
/// The step that produced it logs a warning and completes normally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(transparent)]
pub struct NonFatalWarning(#[from] pub ShellError);
