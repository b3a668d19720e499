//! Deploy environment queries.

use crate::errors::DeployError;
use crate::flags::{Flag, FlagStore};
use std::sync::Arc;

/// Answers whether static content is generated during the deploy phase.
#[cfg_attr(test, mockall::automock)]
pub trait StaticContentEnvironment: Send + Sync {
    /// Returns true if static content is generated in this deploy phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the deciding state cannot be read.
    fn is_deploy_static_content(&self) -> Result<bool, DeployError>;
}

/// Decides deploy-time static content generation from configuration and
/// the build phase's flags.
///
/// Generation is off when it is skipped by configuration or when the build
/// phase already produced the content.
pub struct DeployEnvironment {
    skip_static_content_deploy: bool,
    flags: Arc<dyn FlagStore>,
}

impl DeployEnvironment {
    /// Creates a deploy environment.
    #[must_use]
    pub fn new(skip_static_content_deploy: bool, flags: Arc<dyn FlagStore>) -> Self {
        Self {
            skip_static_content_deploy,
            flags,
        }
    }
}

impl std::fmt::Debug for DeployEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeployEnvironment")
            .field("skip_static_content_deploy", &self.skip_static_content_deploy)
            .finish_non_exhaustive()
    }
}

impl StaticContentEnvironment for DeployEnvironment {
    fn is_deploy_static_content(&self) -> Result<bool, DeployError> {
        if self.skip_static_content_deploy {
            return Ok(false);
        }
        Ok(!self.flags.exists(Flag::StaticContentDeployInBuild)?)
    }
}
