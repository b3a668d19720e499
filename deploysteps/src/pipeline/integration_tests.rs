//! Build and deploy phases wired end to end over a temporary application
//! root.

#[cfg(test)]
mod tests {
    use crate::compression::ShellCompressor;
    use crate::config::{DeployEnvironment, Stage, StageConfig};
    use crate::errors::{codes, DeployError};
    use crate::filesystem::{DirectoryList, LocalFileDriver};
    use crate::flags::{Flag, FileFlagStore, FlagStore};
    use crate::pipeline::Pipeline;
    use crate::shell::{CommandRunner, PlatformShell};
    use crate::steps::{
        BuildStaticContentDeploy, CompressBuildStaticContent, CompressStaticContent, DeployStaticContent,
        RemoteStorage,
    };
    use crate::testing::{capture_logs, FixedVersionGate, RecordingRunner};
    use crate::validators::{ConfigFileStructure, ValidatorLevel};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tempfile::TempDir;

    const SCD: &str = "php ./bin/magento setup:static-content:deploy -f --ansi --no-interaction";

    struct App {
        _root: TempDir,
        directories: DirectoryList,
        flags: Arc<FileFlagStore>,
        runner: Arc<RecordingRunner>,
    }

    impl App {
        fn new(config: &Value, runner: RecordingRunner) -> Self {
            let root = TempDir::new().unwrap();
            let directories = DirectoryList::new(root.path());
            let config_file = directories.config_file();
            std::fs::create_dir_all(config_file.parent().unwrap()).unwrap();
            std::fs::write(&config_file, config.to_string()).unwrap();

            Self {
                flags: Arc::new(FileFlagStore::new(directories.flags_dir())),
                directories,
                _root: root,
                runner: Arc::new(runner),
            }
        }

        fn platform(&self) -> Arc<dyn CommandRunner> {
            Arc::new(PlatformShell::new(self.runner.clone()))
        }

        fn build(&self, config: &StageConfig) -> Pipeline {
            let structure = Arc::new(ConfigFileStructure::new(
                Arc::new(LocalFileDriver::new()),
                self.directories.clone(),
            ));

            Pipeline::new("build")
                .validator(ValidatorLevel::Warning, structure.clone())
                .step(Arc::new(BuildStaticContentDeploy::new(
                    config.skip_static_content_deploy().unwrap(),
                    structure,
                    self.flags.clone(),
                    self.platform(),
                )))
                .step(Arc::new(CompressBuildStaticContent::new(
                    self.flags.clone(),
                    Arc::new(ShellCompressor::new(self.runner.clone())),
                    config.compression().unwrap(),
                )))
        }

        fn deploy(&self, config: &StageConfig, version: FixedVersionGate) -> Pipeline {
            let environment = Arc::new(DeployEnvironment::new(
                config.skip_static_content_deploy().unwrap(),
                self.flags.clone(),
            ));

            Pipeline::new("deploy")
                .step(Arc::new(RemoteStorage::new(
                    config.remote_storage().unwrap(),
                    self.platform(),
                    Arc::new(version),
                )))
                .step(Arc::new(DeployStaticContent::new(
                    environment.clone(),
                    self.flags.clone(),
                    self.platform(),
                )))
                .step(Arc::new(CompressStaticContent::new(
                    environment,
                    self.flags.clone(),
                    Arc::new(ShellCompressor::new(self.runner.clone())),
                    config.compression().unwrap(),
                )))
        }
    }

    fn stores_config() -> Value {
        json!({
            "scopes": {
                "websites": { "base": { "code": "base" } },
                "stores": { "default": { "code": "default" } }
            }
        })
    }

    fn stage(stage: Stage, file: Option<&Value>) -> StageConfig {
        StageConfig::from_sources(stage, file, Vec::<(String, String)>::new()).unwrap()
    }

    #[test]
    fn test_build_time_content_skips_deploy_generation() {
        let app = App::new(&stores_config(), RecordingRunner::new());

        let build = app.build(&stage(Stage::Build, None)).run().unwrap();
        assert!(build.warnings.is_empty());
        assert!(app.flags.exists(Flag::StaticContentDeployInBuild).unwrap());

        let env_file = json!({
            "stage": {
                "deploy": {
                    "REMOTE_STORAGE": {
                        "adapter": "aws-s3",
                        "config": { "bucket": "media", "region": "us-east-1", "prefix": "pub" }
                    }
                }
            }
        });
        let deploy = app
            .deploy(
                &stage(Stage::Deploy, Some(&env_file)),
                FixedVersionGate::new("2.4.3").unwrap(),
            )
            .run()
            .unwrap();
        assert_eq!(deploy.steps_run(), 3);

        let commands = app.runner.commands();
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0], SCD);
        assert!(commands[1].contains("gzip -q --keep -6"));
        assert_eq!(
            commands[2],
            "php ./bin/magento remote-storage:enable aws-s3 media us-east-1 pub --ansi --no-interaction"
        );
    }

    #[test]
    fn test_missing_stores_moves_generation_to_deploy() {
        let app = App::new(&json!({ "scopes": { "groups": {} } }), RecordingRunner::new());

        let (build, logs) = capture_logs(|| app.build(&stage(Stage::Build, None)).run());
        let build = build.unwrap();
        assert_eq!(build.warnings, vec!["No stores/website/locales found in config.json"]);
        assert!(logs.contains("Skipping static content deploy."));
        assert_eq!(app.runner.call_count(), 0);

        app.deploy(&stage(Stage::Deploy, None), FixedVersionGate::new("2.4.2").unwrap())
            .run()
            .unwrap();

        let commands = app.runner.commands();
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0], "php ./bin/magento remote-storage:disable --ansi --no-interaction");
        assert_eq!(commands[1], SCD);
        assert!(commands[2].contains("gzip -q --keep -4"));
        assert!(!app.flags.exists(Flag::StaticContentDeployPending).unwrap());
    }

    #[test]
    fn test_failed_generation_postpones_compression() {
        let app = App::new(
            &json!({}),
            RecordingRunner::new().failing("php ./bin/magento setup:static-content:deploy", 5, "Out of memory"),
        );
        let config = stage(Stage::Deploy, None);

        let error = app
            .deploy(&config, FixedVersionGate::new("2.4.1").unwrap())
            .run()
            .unwrap_err();
        assert_eq!(error.code(), 5);
        assert!(app.flags.exists(Flag::StaticContentDeployPending).unwrap());
        assert!(app.directories.flags_dir().join(".static_content_deploy_pending").exists());

        let environment = Arc::new(DeployEnvironment::new(false, app.flags.clone()));
        let compressor = Arc::new(ShellCompressor::new(app.runner.clone()));
        let retry = Pipeline::new("deploy").step(Arc::new(CompressStaticContent::new(
            environment,
            app.flags.clone(),
            compressor,
            config.compression().unwrap(),
        )));

        let (result, logs) = capture_logs(|| retry.run());
        result.unwrap();
        assert!(logs.contains("Postpone static content compression until prestart"));
        assert!(app.runner.commands().iter().all(|c| !c.contains("gzip")));
    }

    #[test]
    fn test_enable_failure_does_not_halt_deploy() {
        let app = App::new(
            &stores_config(),
            RecordingRunner::new().failing("php ./bin/magento remote-storage:enable", 1, "Unknown adapter"),
        );
        let config = stage(Stage::Deploy, None).with_value(
            StageConfig::REMOTE_STORAGE,
            json!({ "adapter": "gcs", "config": { "bucket": "b", "region": "r" } }),
        );

        let (report, logs) = capture_logs(|| app.deploy(&config, FixedVersionGate::new("2.4.4").unwrap()).run());
        assert_eq!(report.unwrap().steps_run(), 3);
        assert!(logs.contains("Unknown adapter"));
        assert_eq!(app.runner.call_count(), 3);
    }

    #[test]
    fn test_undefined_package_halts_deploy() {
        let app = App::new(&stores_config(), RecordingRunner::new());

        let error = app
            .deploy(
                &stage(Stage::Deploy, None),
                FixedVersionGate::undefined("magento/magento2-base"),
            )
            .run()
            .unwrap_err();

        assert!(matches!(error, DeployError::Step(_)));
        assert_eq!(error.code(), codes::UNDEFINED_PACKAGE);
        assert_eq!(error.to_string(), "Package magento/magento2-base is not defined");
        assert_eq!(app.runner.call_count(), 0);
    }
}
