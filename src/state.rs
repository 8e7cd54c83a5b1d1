//! Application state for Axum web framework.
//!
//! Shared services and resources accessible across all request handlers.

use std::sync::Arc;

use crate::config::{ApiConfig, JwtConfig};
use crate::repositories::Store;
use crate::services::{AccountService, CarService};
use crate::utils::jwt::TokenIssuer;

/// Designed to be used with Axum's State extractor. Cloning is cheap since
/// everything behind it is reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Data access, also used directly by the health check
    pub store: Arc<dyn Store>,
    pub cars: CarService,
    pub accounts: AccountService,
    /// Signing context, built once at startup
    pub tokens: Arc<TokenIssuer>,
    /// Whether car routes require a bearer token
    pub require_auth: bool,
}

impl AppState {
    /// # Example
    /// ```ignore
    /// let store = Arc::new(PgStore::new(pool));
    /// let state = AppState::new(store, &settings.jwt, &settings.api);
    /// ```
    pub fn new(store: Arc<dyn Store>, jwt: &JwtConfig, api: &ApiConfig) -> Self {
        let tokens = Arc::new(TokenIssuer::from_config(jwt));

        Self {
            cars: CarService::new(store.clone()),
            accounts: AccountService::new(store.clone(), tokens.clone()),
            store,
            tokens,
            require_auth: api.require_auth,
        }
    }
}
