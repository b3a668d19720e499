//! # Deploysteps
//!
//! Validators and steps for the build and deploy phases of a cloud
//! e-commerce deployment.
//!
//! The crate provides:
//!
//! - **Validators**: read-only checks returning a [`ValidationResult`](validators::ValidationResult)
//!   with remediation suggestions
//! - **Steps**: side-effecting units that enable remote storage, generate
//!   static content and compress it
//! - **Flags**: marker files coordinating one phase with a later one
//! - **Version gate**: feature gating on the installed platform version
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use deploysteps::prelude::*;
//! use std::sync::Arc;
//!
//! let directories = DirectoryList::new("/app");
//! let config = StageConfig::load(Stage::Deploy, &directories, &LocalFileDriver::new())?;
//! let runner = Arc::new(ProcessRunner::new().with_working_dir(directories.root()));
//! let shell = Arc::new(PlatformShell::new(runner.clone()));
//! let version = Arc::new(ComposerVersionGate::new(Arc::new(LocalFileDriver::new()), directories.clone()));
//!
//! let report = Pipeline::new("deploy")
//!     .step(Arc::new(RemoteStorage::new(config.remote_storage()?, shell, version)))
//!     .run()?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod compression;
pub mod config;
pub mod errors;
pub mod filesystem;
pub mod flags;
pub mod observability;
pub mod package;
pub mod pipeline;
pub mod shell;
pub mod steps;
pub mod testing;
pub mod validators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::compression::{ShellCompressor, StaticContentCompressor};
    pub use crate::config::{
        CompressionConfig, DeployEnvironment, FlatConfig, RemoteStorageConfig, Stage, StageConfig,
        StaticContentEnvironment,
    };
    pub use crate::errors::{
        ConfigError, DeployError, FileSystemError, PackageError, ShellError, StepError,
    };
    pub use crate::filesystem::{DirectoryList, FileDriver, LocalFileDriver};
    pub use crate::flags::{FileFlagStore, Flag, FlagStore, MemoryFlagStore};
    pub use crate::observability::{init_logging, LogFormat};
    pub use crate::package::{ComposerVersionGate, Version, VersionGate};
    pub use crate::pipeline::{Pipeline, PipelineReport, StepRecord};
    pub use crate::shell::{CommandRunner, PlatformShell, ProcessRunner};
    pub use crate::steps::{
        BuildStaticContentDeploy, CompressBuildStaticContent, CompressStaticContent,
        DeployStaticContent, RemoteStorage, Step,
    };
    pub use crate::validators::{
        ConfigFileStructure, Severity, ValidationResult, Validator, ValidatorLevel,
    };
}
