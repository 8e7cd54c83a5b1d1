//! User repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::models::User;
use crate::schema::users;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts unconditionally.
    ///
    /// A login that already exists surfaces as `AppError::Duplicate` from
    /// the primary key; checking beforehand is the caller's job.
    async fn create(&self, user: &User) -> AppResult<User>;

    /// `Ok(None)` when no user has this login.
    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>>;
}

/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: AsyncDbPool,
}

impl DieselUserRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &User) -> AppResult<User> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(users::table)
            .values(user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert user"))
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let mut conn = self.pool.get().await?;

        users::table
            .find(login)
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find user"))
    }
}
