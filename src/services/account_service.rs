//! Account service: registration and credential checks.
//!
//! Password hashing is CPU bound, so both hashing and verification run on
//! the blocking pool.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::repositories::Store;
use crate::utils::jwt::TokenIssuer;
use crate::utils::password::{hash_password, verify_password};

pub const USER_EXISTS: &str = "User with that login already exists in database";
pub const USER_NOT_FOUND: &str = "User with that login does not exists in database. Try register first";
pub const INVALID_PASSWORD: &str = "Your password is invalid";

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn Store>,
    tokens: Arc<TokenIssuer>,
}

impl AccountService {
    pub fn new(store: Arc<dyn Store>, tokens: Arc<TokenIssuer>) -> Self {
        Self { store, tokens }
    }

    /// Registers a new login with a salted hash of `password`.
    ///
    /// # Errors
    /// `Duplicate` when the login exists. A concurrent registration that
    /// slips past the lookup is rejected by the primary key with the same
    /// variant.
    pub async fn register(&self, login: &str, password: &str) -> AppResult<User> {
        let users = self.store.users();

        if users.find_by_login(login).await?.is_some() {
            tracing::info!(login = %login, "Rejected registration of existing login");
            return Err(AppError::duplicate(USER_EXISTS));
        }

        let hash = run_blocking({
            let password = password.to_string();
            move || hash_password(&password)
        })
        .await?;

        let user = users
            .create(&User::new(login, hash))
            .await
            .map_err(|e| match e {
                AppError::Duplicate { .. } => AppError::duplicate(USER_EXISTS),
                other => other,
            })?;

        tracing::info!(login = %user.login, "User registered");
        Ok(user)
    }

    /// Checks credentials and issues a bearer token.
    ///
    /// # Errors
    /// - `NotFound` for an unknown login
    /// - `Unauthorized` for a wrong password
    pub async fn authenticate(&self, login: &str, password: &str) -> AppResult<String> {
        let user = self
            .store
            .users()
            .find_by_login(login)
            .await?
            .ok_or_else(|| {
                tracing::info!(login = %login, "Authentication for unknown login");
                AppError::not_found(USER_NOT_FOUND)
            })?;

        let matches = run_blocking({
            let password = password.to_string();
            move || verify_password(&password, &user.password)
        })
        .await?;

        if !matches {
            tracing::info!(login = %login, "Authentication with wrong password");
            return Err(AppError::unauthorized(INVALID_PASSWORD));
        }

        self.tokens.issue(login)
    }
}

async fn run_blocking<T, F>(task: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("Password task failed: {}", e),
        })?
}
