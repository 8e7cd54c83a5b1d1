//! Layered configuration loading
//!
//! Sources, lowest to highest priority:
//! 1. `default.toml` (required)
//! 2. `{environment}.toml` (optional)
//! 3. `local.toml` (optional)
//! 4. `DEALERSHIP_*` environment variables
//!
//! A single file selected with `DEALERSHIP_CONFIG_FILE` or `--config`
//! replaces layers 1-3. CLI overrides are applied afterwards by
//! `cli::ConfigurationMerger`.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};

use crate::config::environment::Environment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "DEALERSHIP_CONFIG_DIR";
const CONFIG_FILE_ENV: &str = "DEALERSHIP_CONFIG_FILE";
const DEFAULT_CONFIG_DIR: &str = "config";

/// `DEALERSHIP_SERVER__PORT` maps to `server.port`
const ENV_PREFIX: &str = "DEALERSHIP";
const ENV_SEPARATOR: &str = "__";

/// Where file-based configuration comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `default.toml`, `{environment}.toml` and `local.toml` in a directory
    Layered(PathBuf),
    /// One file holding the whole configuration
    SingleFile(PathBuf),
}

#[derive(Debug)]
pub struct ConfigLoader {
    source: ConfigSource,
    environment: Environment,
}

impl ConfigLoader {
    /// Builds a loader from `DEALERSHIP_CONFIG_DIR`, `DEALERSHIP_CONFIG_FILE`
    /// and `DEALERSHIP_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Fails when both source variables are set or the environment name is
    /// unknown.
    pub fn from_env() -> Result<Self, ConfigError> {
        let dir = std::env::var(CONFIG_DIR_ENV).ok();
        let file = std::env::var(CONFIG_FILE_ENV).ok();

        let source = match (dir, file) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::ConflictingSources {
                    dir_var: CONFIG_DIR_ENV,
                    file_var: CONFIG_FILE_ENV,
                });
            }
            (_, Some(file)) => ConfigSource::SingleFile(PathBuf::from(file)),
            (Some(dir), None) => ConfigSource::Layered(PathBuf::from(dir)),
            (None, None) => ConfigSource::Layered(PathBuf::from(DEFAULT_CONFIG_DIR)),
        };

        Ok(Self {
            source,
            environment: Environment::from_env()?,
        })
    }

    /// Replaces the file source with a single explicit file.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = ConfigSource::SingleFile(path.into());
        self
    }

    /// Overrides the environment read from `DEALERSHIP_APP_ENV`.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Merges all sources into `Settings`.
    ///
    /// Values are not validated here; callers validate after applying their
    /// own overrides.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let builder = match &self.source {
            ConfigSource::SingleFile(path) => add_file(Config::builder(), path, true)?,
            ConfigSource::Layered(dir) => {
                let builder = add_file(Config::builder(), &dir.join("default.toml"), true)?;
                let builder = add_file(
                    builder,
                    &dir.join(format!("{}.toml", self.environment.as_str())),
                    false,
                )?;
                add_file(builder, &dir.join("local.toml"), false)?
            }
        };

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(ENV_SEPARATOR)
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?;

        config
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

fn add_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if required && !path.is_file() {
        return Err(ConfigError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(required)))
}
