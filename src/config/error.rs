//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration file does not exist
    #[error("Configuration file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// Sources merged but could not be deserialized into `Settings`
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// A value is out of range or malformed
    #[error("Invalid value for {field}: {message}")]
    ValidationError { field: String, message: String },

    /// `DEALERSHIP_APP_ENV` or `--env` holds an unknown environment name
    #[error("Unknown environment '{value}'. Valid values are: development, test, staging, production")]
    InvalidEnvironment { value: String },

    /// Both a config directory and a single config file were requested
    #[error("{dir_var} and {file_var} cannot both be set")]
    ConflictingSources {
        dir_var: &'static str,
        file_var: &'static str,
    },

    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}
