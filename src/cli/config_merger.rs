//! Merges CLI overrides onto the file and environment configuration
//!
//! CLI flags are the highest-priority layer. Validation runs once, on the
//! merged result.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Environment, Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
    environment: Environment,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings, environment: Environment) -> Self {
        Self {
            base_config,
            environment,
        }
    }

    /// Loads the base configuration the way `cli` asks for
    ///
    /// `--config` replaces the configured source and `--env` replaces
    /// `DEALERSHIP_APP_ENV`.
    ///
    /// # Errors
    /// Returns ConfigError if the sources conflict or cannot be read
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::from_env()?;

        if let Some(path) = &cli.config {
            loader = loader.with_file(path);
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        let settings = loader.load()?;
        Ok(Self::new(settings, loader.environment()))
    }

    /// Applies CLI overrides and validates the result
    ///
    /// Precedence for the log level: `serve --log-level`, then
    /// `--verbose`/`--quiet`, then configuration.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn create_valid_base_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/test".to_string();
        config.jwt.secret = "s".repeat(32);
        config
    }

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(create_valid_base_config(), Environment::Test).merge_cli_args(&cli)
    }

    #[test]
    fn test_no_overrides_keeps_base() {
        let merged = merge(&["dealership-rs"]).unwrap();
        assert_eq!(merged, create_valid_base_config());
    }

    #[test]
    fn test_verbose_and_quiet() {
        assert_eq!(merge(&["dealership-rs", "-v"]).unwrap().logger.level, "debug");
        assert_eq!(merge(&["dealership-rs", "-q"]).unwrap().logger.level, "error");
    }

    #[test]
    fn test_serve_overrides() {
        let merged = merge(&[
            "dealership-rs",
            "--verbose",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "9090",
            "--log-level",
            "trace",
        ])
        .unwrap();

        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 9090);
        assert_eq!(merged.logger.level, "trace");
    }

    #[test]
    fn test_migrate_does_not_touch_server() {
        let merged = merge(&["dealership-rs", "migrate"]).unwrap();
        assert_eq!(merged.server, create_valid_base_config().server);
    }

    #[test]
    fn test_invalid_merged_config_is_rejected() {
        let cli = Cli::try_parse_from(["dealership-rs"]).unwrap();
        let merger = ConfigurationMerger::new(Settings::default(), Environment::Development);

        match merger.merge_cli_args(&cli) {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, "database.url"),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_accessors() {
        let merger = ConfigurationMerger::new(create_valid_base_config(), Environment::Staging);
        assert_eq!(merger.environment(), Environment::Staging);
        assert_eq!(merger.config(), &create_valid_base_config());
    }
}
