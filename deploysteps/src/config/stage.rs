//! Stage-scoped configuration.
//!
//! Values are merged from three sources, later ones winning:
//!
//! 1. built-in defaults for the stage,
//! 2. the `.deploy.env.json` file (`stage.global`, then `stage.<stage>`),
//! 3. process environment variables named after the option keys.
//!
//! Environment values arrive as strings; typed getters coerce them.

use super::RemoteStorageConfig;
use crate::errors::{ConfigError, DeployError};
use crate::filesystem::{DirectoryList, FileDriver};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

/// Deployment phase a configuration view belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Build phase: no services available, application code is writable.
    Build,
    /// Deploy phase: services available, application code is read-only.
    Deploy,
}

impl Stage {
    fn section(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Deploy => "deploy",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section())
    }
}

/// Static content compression options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionConfig {
    /// gzip level; `0` disables compression.
    pub level: i64,
    /// Verbosity switch passed to commands (`-v`, `-vv`, `-vvv` or empty).
    pub verbose: String,
}

/// A read-only, stage-scoped view of the deployment options.
#[derive(Debug, Clone, PartialEq)]
pub struct StageConfig {
    stage: Stage,
    values: Map<String, Value>,
}

impl StageConfig {
    /// gzip level for static content compression.
    pub const SCD_COMPRESSION_LEVEL: &'static str = "SCD_COMPRESSION_LEVEL";
    /// Skip static content generation.
    pub const SKIP_SCD: &'static str = "SKIP_SCD";
    /// Verbosity of platform CLI commands.
    pub const VERBOSE_COMMANDS: &'static str = "VERBOSE_COMMANDS";
    /// Remote storage adapter and connection options.
    pub const REMOTE_STORAGE: &'static str = "REMOTE_STORAGE";

    const KNOWN_KEYS: [&'static str; 4] = [
        Self::SCD_COMPRESSION_LEVEL,
        Self::SKIP_SCD,
        Self::VERBOSE_COMMANDS,
        Self::REMOTE_STORAGE,
    ];

    const VERBOSITY_LEVELS: [&'static str; 4] = ["", "-v", "-vv", "-vvv"];

    /// Creates a view holding only the defaults for `stage`.
    #[must_use]
    pub fn new(stage: Stage) -> Self {
        let level = match stage {
            Stage::Build => 6,
            Stage::Deploy => 4,
        };

        let mut values = Map::new();
        values.insert(Self::SCD_COMPRESSION_LEVEL.to_string(), json!(level));
        values.insert(Self::SKIP_SCD.to_string(), json!(false));
        values.insert(Self::VERBOSE_COMMANDS.to_string(), json!(""));
        values.insert(Self::REMOTE_STORAGE.to_string(), Value::Null);

        Self { stage, values }
    }

    /// Builds a view from an optional env file document and environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the document's `stage` sections are not
    /// objects.
    pub fn from_sources<I, K, V>(stage: Stage, file: Option<&Value>, env: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::new(stage);

        if let Some(document) = file {
            let sections = match document.get("stage") {
                None | Some(Value::Null) => None,
                Some(Value::Object(sections)) => Some(sections),
                Some(_) => return Err(ConfigError::new("stage", "expected an object")),
            };

            for section in ["global", stage.section()] {
                match sections.and_then(|s| s.get(section)) {
                    None | Some(Value::Null) => {}
                    Some(Value::Object(values)) => config.values.extend(values.clone()),
                    Some(_) => {
                        return Err(ConfigError::new(format!("stage.{section}"), "expected an object"))
                    }
                }
            }
        }

        for (key, value) in env {
            let key = key.as_ref();
            if Self::KNOWN_KEYS.contains(&key) {
                config.values.insert(key.to_string(), Value::String(value.into()));
            }
        }

        Ok(config)
    }

    /// Loads the view for `stage` from the application's env file and the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the env file exists but cannot be read or is
    /// malformed.
    pub fn load(stage: Stage, directories: &DirectoryList, file: &dyn FileDriver) -> Result<Self, DeployError> {
        let path = directories.env_config_file();
        let document = if file.is_exists(&path) {
            Some(file.require_file(&path)?)
        } else {
            None
        };

        Ok(Self::from_sources(stage, document.as_ref(), std::env::vars())?)
    }

    /// Returns a copy with `key` overridden.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Returns the stage this view belongs to.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the raw value of an option.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns the static content compression level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the value is not an integer.
    pub fn compression_level(&self) -> Result<i64, ConfigError> {
        let key = Self::SCD_COMPRESSION_LEVEL;
        match self.get(key) {
            Some(Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| ConfigError::new(key, format!("expected an integer, got {n}"))),
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map_err(|_| ConfigError::new(key, format!("expected an integer, got '{s}'"))),
            other => Err(ConfigError::new(key, format!("expected an integer, got {}", describe(other)))),
        }
    }

    /// Returns whether static content generation is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the value is not a boolean.
    pub fn skip_static_content_deploy(&self) -> Result<bool, ConfigError> {
        self.get_bool(Self::SKIP_SCD)
    }

    /// Returns the verbosity switch for platform commands.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the value is not one of `-v`, `-vv`,
    /// `-vvv` or empty.
    pub fn verbose_commands(&self) -> Result<String, ConfigError> {
        let key = Self::VERBOSE_COMMANDS;
        let value = match self.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.trim().to_string(),
            other => return Err(ConfigError::new(key, format!("expected a string, got {}", describe(other)))),
        };

        if Self::VERBOSITY_LEVELS.contains(&value.as_str()) {
            Ok(value)
        } else {
            Err(ConfigError::new(key, format!("expected one of -v, -vv, -vvv, got '{value}'")))
        }
    }

    /// Returns the compression options.
    ///
    /// # Errors
    ///
    /// Returns the first malformed option.
    pub fn compression(&self) -> Result<CompressionConfig, ConfigError> {
        Ok(CompressionConfig {
            level: self.compression_level()?,
            verbose: self.verbose_commands()?,
        })
    }

    /// Returns the remote storage options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the option is neither an object nor a JSON
    /// string describing one.
    pub fn remote_storage(&self) -> Result<RemoteStorageConfig, ConfigError> {
        let key = Self::REMOTE_STORAGE;
        let value = match self.get(key) {
            None | Some(Value::Null) => return Ok(RemoteStorageConfig::default()),
            Some(Value::String(s)) if s.trim().is_empty() => return Ok(RemoteStorageConfig::default()),
            Some(Value::String(s)) => {
                serde_json::from_str(s).map_err(|e| ConfigError::new(key, e.to_string()))?
            }
            Some(value) => value.clone(),
        };

        serde_json::from_value(value).map_err(|e| ConfigError::new(key, e.to_string()))
    }

    fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::Number(n)) if n.as_i64() == Some(0) => Ok(false),
            Some(Value::Number(n)) if n.as_i64() == Some(1) => Ok(true),
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "enabled" => Ok(true),
                "false" | "0" | "" | "no" | "disabled" => Ok(false),
                _ => Err(ConfigError::new(key, format!("expected a boolean, got '{s}'"))),
            },
            other => Err(ConfigError::new(key, format!("expected a boolean, got {}", describe(other)))),
        }
    }
}

fn describe(value: Option<&Value>) -> String {
    value.map_or_else(|| "nothing".to_string(), ToString::to_string)
}
