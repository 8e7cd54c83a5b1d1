//! Store: owner of the connection pool and hand-out point for repositories.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::repositories::{CarRepository, DieselCarRepository, DieselUserRepository, UserRepository};

/// Entry point to data access.
///
/// Handlers and services only see this trait, so tests can swap the
/// PostgreSQL store for an in-memory one.
#[async_trait]
pub trait Store: Send + Sync {
    fn cars(&self) -> Arc<dyn CarRepository>;

    fn users(&self) -> Arc<dyn UserRepository>;

    /// Round trip to the backing store
    async fn ping(&self) -> AppResult<()>;
}

/// PostgreSQL store. Repositories are built on first use and then shared.
pub struct PgStore {
    pool: AsyncDbPool,
    cars: OnceLock<Arc<DieselCarRepository>>,
    users: OnceLock<Arc<DieselUserRepository>>,
}

impl PgStore {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            pool,
            cars: OnceLock::new(),
            users: OnceLock::new(),
        }
    }
}

#[async_trait]
impl Store for PgStore {
    fn cars(&self) -> Arc<dyn CarRepository> {
        self.cars
            .get_or_init(|| Arc::new(DieselCarRepository::new(self.pool.clone())))
            .clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.users
            .get_or_init(|| Arc::new(DieselUserRepository::new(self.pool.clone())))
            .clone()
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.pool.get().await?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "ping"))?;
        Ok(())
    }
}
