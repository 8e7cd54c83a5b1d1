//! Configuration validation
//!
//! Each section checks its own values; errors name the offending field so
//! they can be traced back to a TOML key or `DEALERSHIP_*` variable.

use crate::config::error::ConfigError;
use crate::config::settings::{DatabaseConfig, JwtConfig, LoggerSettings, ServerConfig, Settings};

/// Minimum HS256 secret length
const MIN_SECRET_LEN: usize = 32;

/// Longest accepted token lifetime, one year in hours
pub const MAX_TOKEN_EXPIRATION_HOURS: i64 = 24 * 365;

const POSTGRES_SCHEMES: &[&str] = &["postgres://", "postgresql://"];

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host is required. Use 0.0.0.0 to listen on all interfaces.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// # Validation Rules
    /// - URL must be a PostgreSQL URL
    /// - Max connections must be greater than 0
    /// - Min connections must not exceed max connections
    /// - Connection timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Set it in a config file or DEALERSHIP_DATABASE__URL.",
            ));
        }

        if !POSTGRES_SCHEMES
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
        {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL. Expected postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::ValidationError {
                field: "database.min_connections".to_string(),
                message: format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            });
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl JwtConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::ValidationError {
                field: "jwt.secret".to_string(),
                message: format!("JWT secret must be at least {} characters.", MIN_SECRET_LEN),
            });
        }

        if self.token_expiration <= 0 {
            return Err(ConfigError::validation(
                "jwt.token_expiration",
                "Token expiration must be a positive number of hours.",
            ));
        }

        if self.token_expiration > MAX_TOKEN_EXPIRATION_HOURS {
            return Err(ConfigError::ValidationError {
                field: "jwt.token_expiration".to_string(),
                message: format!(
                    "Token expiration must not exceed {} hours.",
                    MAX_TOKEN_EXPIRATION_HOURS
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Valid when it converts into a runtime logger configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.to_logger_config().map(|_| ())
    }
}

impl Settings {
    /// Returns the first validation error across all sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.jwt.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
