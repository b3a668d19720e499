//! Static content generation steps. These produce the flags the
//! compression steps consume.

use super::Step;
use crate::config::StaticContentEnvironment;
use crate::errors::StepError;
use crate::flags::{Flag, FlagStore};
use crate::shell::CommandRunner;
use crate::validators::Validator;
use std::sync::Arc;
use tracing::info;

const DEPLOY_COMMAND: &str = "setup:static-content:deploy -f";

/// Generates static content at build time when the persisted configuration
/// holds enough store data, and marks it with
/// [`Flag::StaticContentDeployInBuild`].
pub struct BuildStaticContentDeploy {
    skip: bool,
    validator: Arc<dyn Validator>,
    flags: Arc<dyn FlagStore>,
    shell: Arc<dyn CommandRunner>,
}

impl BuildStaticContentDeploy {
    /// Creates the step. `validator` decides whether the configuration file
    /// allows build-time generation and `shell` runs platform commands.
    #[must_use]
    pub fn new(
        skip: bool,
        validator: Arc<dyn Validator>,
        flags: Arc<dyn FlagStore>,
        shell: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            skip,
            validator,
            flags,
            shell,
        }
    }
}

impl std::fmt::Debug for BuildStaticContentDeploy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildStaticContentDeploy")
            .field("skip", &self.skip)
            .field("validator", &self.validator.name())
            .finish_non_exhaustive()
    }
}

impl Step for BuildStaticContentDeploy {
    fn name(&self) -> &str {
        "build-static-content-deploy"
    }

    fn execute(&self) -> Result<(), StepError> {
        self.flags.delete(Flag::StaticContentDeployInBuild)?;

        if self.skip {
            info!(step = self.name(), "Skipping static content deploy. SKIP_SCD is set for the build stage.");
            return Ok(());
        }

        let result = self.validator.validate()?;
        if let Some(message) = result.message() {
            info!(
                step = self.name(),
                validator = self.validator.name(),
                "Skipping static content deploy. {message}"
            );
            return Ok(());
        }

        self.shell.execute(DEPLOY_COMMAND)?;
        self.flags.set(Flag::StaticContentDeployInBuild)?;
        info!(step = self.name(), "Static content was deployed during the build phase");
        Ok(())
    }
}

/// Generates static content during the deploy phase.
///
/// [`Flag::StaticContentDeployPending`] is held while generation runs and is
/// only cleared once the command succeeded, so an interrupted generation
/// keeps later compression postponed.
pub struct DeployStaticContent {
    environment: Arc<dyn StaticContentEnvironment>,
    flags: Arc<dyn FlagStore>,
    shell: Arc<dyn CommandRunner>,
}

impl DeployStaticContent {
    /// Creates the step.
    #[must_use]
    pub fn new(
        environment: Arc<dyn StaticContentEnvironment>,
        flags: Arc<dyn FlagStore>,
        shell: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            environment,
            flags,
            shell,
        }
    }
}

impl std::fmt::Debug for DeployStaticContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeployStaticContent").finish_non_exhaustive()
    }
}

impl Step for DeployStaticContent {
    fn name(&self) -> &str {
        "deploy-static-content"
    }

    fn execute(&self) -> Result<(), StepError> {
        if !self.environment.is_deploy_static_content()? {
            info!(step = self.name(), "Static content was deployed during the build phase or disabled. Skipping.");
            return Ok(());
        }

        self.flags.set(Flag::StaticContentDeployPending)?;
        self.shell.execute(DEPLOY_COMMAND)?;
        self.flags.delete(Flag::StaticContentDeployPending)?;

        info!(step = self.name(), "Static content was deployed");
        Ok(())
    }
}
