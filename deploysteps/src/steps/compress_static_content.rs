//! Static content compression steps for the build and deploy phases.

use super::Step;
use crate::compression::StaticContentCompressor;
use crate::config::{CompressionConfig, StaticContentEnvironment};
use crate::errors::StepError;
use crate::flags::{Flag, FlagStore};
use std::sync::Arc;
use tracing::info;

/// Compresses static content generated during the deploy phase.
///
/// Content generated at build time is compressed by
/// [`CompressBuildStaticContent`] instead, and content whose generation is
/// still pending is left for a later phase.
pub struct CompressStaticContent {
    environment: Arc<dyn StaticContentEnvironment>,
    flags: Arc<dyn FlagStore>,
    compressor: Arc<dyn StaticContentCompressor>,
    config: CompressionConfig,
}

impl CompressStaticContent {
    /// Creates the deploy-phase compression step.
    #[must_use]
    pub fn new(
        environment: Arc<dyn StaticContentEnvironment>,
        flags: Arc<dyn FlagStore>,
        compressor: Arc<dyn StaticContentCompressor>,
        config: CompressionConfig,
    ) -> Self {
        Self {
            environment,
            flags,
            compressor,
            config,
        }
    }
}

impl std::fmt::Debug for CompressStaticContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompressStaticContent")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Step for CompressStaticContent {
    fn name(&self) -> &str {
        "compress-static-content"
    }

    fn execute(&self) -> Result<(), StepError> {
        if !self.environment.is_deploy_static_content()? {
            info!(
                step = self.name(),
                "Static content deployment was performed during the build phase or disabled. \
                 Skipping deploy phase static content compression."
            );
            return Ok(());
        }

        if self.flags.exists(Flag::StaticContentDeployPending)? {
            info!(
                step = self.name(),
                flag = %Flag::StaticContentDeployPending,
                "Postpone static content compression until prestart"
            );
            return Ok(());
        }

        self.compressor.process(self.config.level, &self.config.verbose)?;
        Ok(())
    }
}

/// Compresses static content generated during the build phase.
pub struct CompressBuildStaticContent {
    flags: Arc<dyn FlagStore>,
    compressor: Arc<dyn StaticContentCompressor>,
    config: CompressionConfig,
}

impl CompressBuildStaticContent {
    /// Creates the build-phase compression step.
    #[must_use]
    pub fn new(flags: Arc<dyn FlagStore>, compressor: Arc<dyn StaticContentCompressor>, config: CompressionConfig) -> Self {
        Self {
            flags,
            compressor,
            config,
        }
    }
}

impl std::fmt::Debug for CompressBuildStaticContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompressBuildStaticContent")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Step for CompressBuildStaticContent {
    fn name(&self) -> &str {
        "compress-build-static-content"
    }

    fn execute(&self) -> Result<(), StepError> {
        if !self.flags.exists(Flag::StaticContentDeployInBuild)? {
            info!(
                step = self.name(),
                "Static content was not deployed during the build phase. \
                 Skipping build phase static content compression."
            );
            return Ok(());
        }

        self.compressor.process(self.config.level, &self.config.verbose)?;
        Ok(())
    }
}
