//! Enables or disables remote storage during deployment.

use super::{NonFatalWarning, Step};
use crate::config::RemoteStorageConfig;
use crate::errors::StepError;
use crate::package::VersionGate;
use crate::shell::{quote, CommandRunner};
use std::sync::Arc;
use tracing::{info, warn};

/// First platform version shipping the remote storage commands.
const MIN_VERSION: &str = "2.4.2";
const ENABLE_COMMAND: &str = "remote-storage:enable";
const DISABLE_COMMAND: &str = "remote-storage:disable";

/// Switches the platform's media storage to the configured remote adapter,
/// or back to local storage when no adapter is configured.
///
/// Enabling is best-effort: a failing enable command is logged as a
/// warning and the deployment continues. Disabling is not.
pub struct RemoteStorage {
    config: RemoteStorageConfig,
    shell: Arc<dyn CommandRunner>,
    version: Arc<dyn VersionGate>,
}

impl RemoteStorage {
    /// Creates the step. `shell` must be a platform CLI runner.
    #[must_use]
    pub fn new(config: RemoteStorageConfig, shell: Arc<dyn CommandRunner>, version: Arc<dyn VersionGate>) -> Self {
        Self { config, shell, version }
    }

    /// Shell-quoted `enable` arguments.
    fn arguments(&self, adapter: &str) -> Vec<String> {
        let positional = [
            adapter,
            self.config.bucket.as_str(),
            self.config.region.as_str(),
            self.config.prefix.as_str(),
        ];
        let mut arguments: Vec<String> = positional
            .into_iter()
            .map(|arg| quote(arg).into_owned())
            .collect();

        if let Some((key, secret)) = self.config.credentials() {
            arguments.push(format!("--access-key={}", quote(key)));
            arguments.push(format!("--secret-key={}", quote(secret)));
        }

        arguments
    }

    fn enable(&self, adapter: &str) -> Result<(), NonFatalWarning> {
        let command = format!("{ENABLE_COMMAND} {}", self.arguments(adapter).join(" "));
        self.shell.execute(&command)?;
        Ok(())
    }
}

impl std::fmt::Debug for RemoteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteStorage")
            .field("adapter", &self.config.adapter())
            .finish_non_exhaustive()
    }
}

impl Step for RemoteStorage {
    fn name(&self) -> &str {
        "remote-storage"
    }

    fn execute(&self) -> Result<(), StepError> {
        if !self.version.is_greater_or_equal(MIN_VERSION)? {
            info!(step = self.name(), "Remote storage requires version {MIN_VERSION} or later, skipping");
            return Ok(());
        }

        let Some(adapter) = self.config.adapter() else {
            self.shell.execute(DISABLE_COMMAND)?;
            info!(step = self.name(), "Remote storage was disabled");
            return Ok(());
        };

        match self.enable(adapter) {
            Ok(()) => info!(step = self.name(), "Remote storage with driver \"{adapter}\" was enabled"),
            Err(warning) => warn!(step = self.name(), "{warning}"),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{codes, PackageError, ShellError};
    use crate::package::MockVersionGate;
    use crate::shell::MockCommandRunner;
    use crate::shell::PlatformShell;
    use crate::testing::{capture_logs, FixedVersionGate, RecordingRunner};
    use mockall::predicate::eq;

    fn version_at_least(result: Result<bool, PackageError>) -> MockVersionGate {
        let mut version = MockVersionGate::new();
        version
            .expect_is_greater_or_equal()
            .with(eq("2.4.2"))
            .times(1)
            .return_const(result);
        version
    }

    fn full_config() -> RemoteStorageConfig {
        RemoteStorageConfig {
            adapter: Some("aws-s3".into()),
            bucket: "media".into(),
            region: "us-east-1".into(),
            prefix: "pub".into(),
            key: Some("AK".into()),
            secret: Some("SK".into()),
        }
    }

    #[test]
    fn test_old_version_is_a_no_op() {
        let mut shell = MockCommandRunner::new();
        shell.expect_execute().times(0);

        let step = RemoteStorage::new(full_config(), Arc::new(shell), Arc::new(version_at_least(Ok(false))));
        step.execute().unwrap();
    }

    #[test]
    fn test_undefined_version_is_wrapped() {
        let mut shell = MockCommandRunner::new();
        shell.expect_execute().times(0);

        let version = version_at_least(Err(PackageError::Undefined("magento/magento2-base".into())));
        let step = RemoteStorage::new(full_config(), Arc::new(shell), Arc::new(version));

        let error = step.execute().unwrap_err();
        assert_eq!(error.message, "Package magento/magento2-base is not defined");
        assert_eq!(error.code, codes::UNDEFINED_PACKAGE);
    }

    #[test]
    fn test_no_adapter_disables() {
        let mut shell = MockCommandRunner::new();
        shell
            .expect_execute()
            .with(eq("remote-storage:disable"))
            .times(1)
            .returning(|_| Ok(String::new()));

        let step = RemoteStorage::new(
            RemoteStorageConfig::default(),
            Arc::new(shell),
            Arc::new(version_at_least(Ok(true))),
        );
        step.execute().unwrap();
    }

    #[test]
    fn test_disable_failure_is_fatal() {
        let mut shell = MockCommandRunner::new();
        shell
            .expect_execute()
            .times(1)
            .returning(|cmd| Err(ShellError::new(cmd, 1, "Remote storage is locked")));

        let step = RemoteStorage::new(
            RemoteStorageConfig::default(),
            Arc::new(shell),
            Arc::new(version_at_least(Ok(true))),
        );

        let error = step.execute().unwrap_err();
        assert_eq!(error.code, 1);
        assert!(error.message.contains("Remote storage is locked"));
    }

    #[test]
    fn test_enable_with_credentials() {
        let mut shell = MockCommandRunner::new();
        shell
            .expect_execute()
            .with(eq("remote-storage:enable aws-s3 media us-east-1 pub --access-key=AK --secret-key=SK"))
            .times(1)
            .returning(|_| Ok(String::new()));

        let step = RemoteStorage::new(full_config(), Arc::new(shell), Arc::new(version_at_least(Ok(true))));

        let (result, logs) = capture_logs(|| step.execute());
        result.unwrap();
        assert!(logs.contains("Remote storage with driver \"aws-s3\" was enabled"));
    }

    #[test]
    fn test_enable_without_credentials() {
        let mut config = full_config();
        config.key = None;
        config.secret = None;

        let mut shell = MockCommandRunner::new();
        shell
            .expect_execute()
            .with(eq("remote-storage:enable aws-s3 media us-east-1 pub"))
            .times(1)
            .returning(|_| Ok(String::new()));

        let step = RemoteStorage::new(config, Arc::new(shell), Arc::new(version_at_least(Ok(true))));
        step.execute().unwrap();
    }

    #[test]
    fn test_partial_credentials_are_dropped() {
        let mut config = full_config();
        config.secret = None;

        let mut shell = MockCommandRunner::new();
        shell
            .expect_execute()
            .withf(|cmd: &str| {
                cmd.starts_with("remote-storage:enable aws-s3")
                    && !cmd.contains("--access-key")
                    && !cmd.contains("--secret-key")
            })
            .times(1)
            .returning(|_| Ok(String::new()));

        let step = RemoteStorage::new(config, Arc::new(shell), Arc::new(version_at_least(Ok(true))));
        step.execute().unwrap();
    }

    #[test]
    fn test_enable_failure_is_a_warning() {
        let mut shell = MockCommandRunner::new();
        shell
            .expect_execute()
            .times(1)
            .returning(|cmd| Err(ShellError::new(cmd, 1, "Adapter aws-s3 is not supported")));

        let step = RemoteStorage::new(full_config(), Arc::new(shell), Arc::new(version_at_least(Ok(true))));

        let (result, logs) = capture_logs(|| step.execute());
        assert!(result.is_ok());
        assert!(logs.contains("WARN"));
        assert!(logs.contains("Adapter aws-s3 is not supported"));
        assert!(!logs.contains("was enabled"));
    }

    #[test]
    fn test_arguments_are_shell_quoted() {
        let config = RemoteStorageConfig {
            prefix: "my media".into(),
            secret: Some("a$b;c".into()),
            ..full_config()
        };

        let mut shell = MockCommandRunner::new();
        shell
            .expect_execute()
            .with(eq(
                "remote-storage:enable aws-s3 media us-east-1 'my media' --access-key=AK --secret-key='a$b;c'",
            ))
            .times(1)
            .returning(|_| Ok(String::new()));

        let step = RemoteStorage::new(config, Arc::new(shell), Arc::new(version_at_least(Ok(true))));
        step.execute().unwrap();
    }

    #[test]
    fn test_failed_enable_never_logs_credentials() {
        let config = RemoteStorageConfig {
            key: Some("AKIAEXAMPLEKEY".into()),
            secret: Some("TOPSECRETVALUE".into()),
            ..full_config()
        };
        let runner = Arc::new(RecordingRunner::new().failing(
            "php ./bin/magento remote-storage:enable",
            1,
            "Unknown adapter",
        ));
        let step = RemoteStorage::new(
            config,
            Arc::new(PlatformShell::new(runner.clone())),
            Arc::new(FixedVersionGate::new("2.4.4").unwrap()),
        );

        let (result, logs) = capture_logs(|| step.execute());
        result.unwrap();

        assert!(runner.commands()[0].contains("--secret-key=TOPSECRETVALUE"));
        assert!(logs.contains("Unknown adapter"));
        assert!(logs.contains("--secret-key=******"));
        assert!(!logs.contains("TOPSECRETVALUE"));
        assert!(!logs.contains("AKIAEXAMPLEKEY"));
    }
}
