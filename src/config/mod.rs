//! Configuration management
//!
//! Settings are read from TOML files in `config/`, overlaid by
//! `DEALERSHIP_*` environment variables and finally by CLI flags. See
//! [`loader`] for the exact precedence.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::{ConfigLoader, ConfigSource};
pub use settings::{ApiConfig, DatabaseConfig, JwtConfig, ServerConfig, Settings};
