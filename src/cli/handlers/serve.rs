//! Serve command handler

use crate::config::{Environment, Settings};
use crate::server::Server;

pub struct ServeCommandHandler {
    settings: Settings,
    environment: Environment,
}

impl ServeCommandHandler {
    pub fn new(settings: Settings, environment: Environment) -> Self {
        Self {
            settings,
            environment,
        }
    }

    /// Runs the server, or with `dry_run` prints the effective
    /// configuration and returns.
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            println!("{}", self.summary());
            return Ok(());
        }

        Server::new(self.settings, self.environment).run().await
    }

    /// Human-readable configuration summary without secrets
    pub fn summary(&self) -> String {
        let s = &self.settings;
        let file_log = if s.logger.file.enabled {
            s.logger.file.path.as_str()
        } else {
            "disabled"
        };

        format!(
            "✓ Configuration is valid\n\
             \n\
             Environment:      {}\n\
             Listen address:   {}\n\
             Pool size:        {}..={} (timeout {}s)\n\
             Auto migrate:     {}\n\
             Token lifetime:   {}h\n\
             Require auth:     {}\n\
             Log level:        {}\n\
             File log:         {}",
            self.environment,
            s.server.address(),
            s.database.min_connections,
            s.database.max_connections,
            s.database.connection_timeout,
            s.database.auto_migrate,
            s.jwt.token_expiration,
            s.api.require_auth,
            s.logger.level,
            file_log,
        )
    }
}
