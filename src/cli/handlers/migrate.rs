//! Migrate command handler
//!
//! Applies, previews or reverts the embedded migrations.

use crate::config::Settings;
use crate::db::{pending_migrations, revert_migrations, run_pending_migrations};
use crate::error::AppResult;

pub struct MigrateCommandHandler {
    settings: Settings,
}

impl MigrateCommandHandler {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.settings.database.validate()?;
        let url = &self.settings.database.url;

        if dry_run {
            let pending = pending_migrations(url).await?;
            println!("{}", Self::report("pending", &pending));
            if !pending.is_empty() {
                println!("\nRun without --dry-run to apply these migrations");
            }
            return Ok(());
        }

        match rollback {
            Some(steps) => {
                tracing::warn!(steps, "Reverting migrations");
                let reverted = revert_migrations(url, steps).await?;
                println!("{}", Self::report("reverted", &reverted));
            }
            None => {
                let applied = run_pending_migrations(url).await?;
                tracing::info!(count = applied.len(), "Migrations applied");
                println!("{}", Self::report("applied", &applied));
            }
        }

        Ok(())
    }

    fn report(action: &str, migrations: &[String]) -> String {
        if migrations.is_empty() {
            return format!("✓ No migrations {} - database is up to date", action);
        }

        let mut out = format!("✓ {} {} migration(s):", migrations.len(), action);
        for name in migrations {
            out.push_str("\n  - ");
            out.push_str(name);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_report() {
        assert_eq!(
            MigrateCommandHandler::report("applied", &[]),
            "✓ No migrations applied - database is up to date"
        );
        assert_eq!(
            MigrateCommandHandler::report("reverted", &["00001".to_string(), "00002".to_string()]),
            "✓ 2 reverted migration(s):\n  - 00001\n  - 00002"
        );
    }

    #[tokio::test]
    async fn test_invalid_database_config_fails_before_connecting() {
        let handler = MigrateCommandHandler::new(Settings::default());

        match handler.execute(true, None).await {
            Err(AppError::Configuration { key, .. }) => assert_eq!(key, "database.url"),
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }
}
