//! Configuration: stage-scoped options, flattened config trees and the
//! deploy environment.

mod environment;
mod flatten;
mod remote_storage;
mod stage;

pub use environment::{DeployEnvironment, StaticContentEnvironment};
pub use flatten::{FlatConfig, PATH_SEPARATOR};
pub use remote_storage::RemoteStorageConfig;
pub use stage::{CompressionConfig, Stage, StageConfig};

#[cfg(test)]
pub use environment::MockStaticContentEnvironment;
