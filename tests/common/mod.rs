//! Shared fixtures: in-memory stores and a router builder.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use dealership::AppState;
use dealership::api::create_router;
use dealership::config::{ApiConfig, JwtConfig};
use dealership::error::{AppError, AppResult};
use dealership::models::{Car, User};
use dealership::repositories::{CarRepository, Store, UserRepository};

pub const SECRET: &str = "integration-test-secret-of-32-characters!";

/// Store backed by ordered maps, with the same contract as the PostgreSQL one.
#[derive(Default)]
pub struct MemoryStore {
    cars: Arc<MemoryCars>,
    users: Arc<MemoryUsers>,
}

#[derive(Default)]
pub struct MemoryCars {
    rows: Mutex<BTreeMap<String, Car>>,
}

#[derive(Default)]
pub struct MemoryUsers {
    rows: Mutex<BTreeMap<String, User>>,
}

impl MemoryStore {
    pub fn car(&self, mark: &str) -> Option<Car> {
        self.cars.rows.lock().unwrap().get(mark).cloned()
    }

    pub fn car_count(&self) -> usize {
        self.cars.rows.lock().unwrap().len()
    }

    pub fn user(&self, login: &str) -> Option<User> {
        self.users.rows.lock().unwrap().get(login).cloned()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn cars(&self) -> Arc<dyn CarRepository> {
        self.cars.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl CarRepository for MemoryCars {
    async fn create(&self, car: &Car) -> AppResult<Option<Car>> {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&car.mark) {
            return Ok(None);
        }
        rows.insert(car.mark.clone(), car.clone());
        Ok(Some(car.clone()))
    }

    async fn update(&self, car: &Car) -> AppResult<Option<Car>> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&car.mark) {
            Some(existing) => {
                *existing = car.clone();
                Ok(Some(car.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, mark: &str) -> AppResult<Option<Car>> {
        Ok(self.rows.lock().unwrap().remove(mark))
    }

    async fn find_by_id(&self, mark: &str) -> AppResult<Option<Car>> {
        Ok(self.rows.lock().unwrap().get(mark).cloned())
    }

    async fn select_all(&self) -> AppResult<Vec<Car>> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn create(&self, user: &User) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&user.login) {
            return Err(AppError::duplicate("users with login already exists"));
        }
        rows.insert(user.login.clone(), user.clone());
        Ok(user.clone())
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        Ok(self.rows.lock().unwrap().get(login).cloned())
    }
}

/// Shares a `MemoryStore` but its user lookups always miss, so every
/// registration reaches the insert as if it had lost a race.
pub struct RacingStore {
    inner: Arc<MemoryStore>,
}

impl RacingStore {
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self { inner }
    }
}

struct BlindUsers(Arc<MemoryUsers>);

#[async_trait]
impl Store for RacingStore {
    fn cars(&self) -> Arc<dyn CarRepository> {
        self.inner.cars.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(BlindUsers(self.inner.users.clone()))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl UserRepository for BlindUsers {
    async fn create(&self, user: &User) -> AppResult<User> {
        self.0.create(user).await
    }

    async fn find_by_login(&self, _login: &str) -> AppResult<Option<User>> {
        Ok(None)
    }
}

/// Store whose every call fails the way an unreachable database does.
pub struct FailingStore;

fn unavailable() -> AppError {
    AppError::ConnectionPool {
        source: anyhow::anyhow!("connection refused"),
    }
}

#[async_trait]
impl Store for FailingStore {
    fn cars(&self) -> Arc<dyn CarRepository> {
        Arc::new(FailingStore)
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(FailingStore)
    }

    async fn ping(&self) -> AppResult<()> {
        Err(unavailable())
    }
}

#[async_trait]
impl CarRepository for FailingStore {
    async fn create(&self, _car: &Car) -> AppResult<Option<Car>> {
        Err(unavailable())
    }

    async fn update(&self, _car: &Car) -> AppResult<Option<Car>> {
        Err(unavailable())
    }

    async fn delete_by_id(&self, _mark: &str) -> AppResult<Option<Car>> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _mark: &str) -> AppResult<Option<Car>> {
        Err(unavailable())
    }

    async fn select_all(&self) -> AppResult<Vec<Car>> {
        Err(unavailable())
    }
}

#[async_trait]
impl UserRepository for FailingStore {
    async fn create(&self, _user: &User) -> AppResult<User> {
        Err(unavailable())
    }

    async fn find_by_login(&self, _login: &str) -> AppResult<Option<User>> {
        Err(unavailable())
    }
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: SECRET.to_string(),
        token_expiration: 2,
    }
}

pub fn state_with(store: Arc<dyn Store>, require_auth: bool) -> AppState {
    AppState::new(store, &jwt_config(), &ApiConfig { require_auth })
}

pub fn app(store: Arc<dyn Store>) -> Router {
    create_router(state_with(store, false))
}

pub fn guarded_app(store: Arc<dyn Store>) -> Router {
    create_router(state_with(store, true))
}

/// Sends one request and returns status plus parsed JSON body (`Null` when empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

/// Sends a JSON body without any `Content-Type` header and returns the status.
pub async fn send_without_content_type(app: &Router, method: Method, uri: &str, body: Value) -> StatusCode {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();

    app.clone().oneshot(request).await.unwrap().status()
}

pub fn tesla_body() -> Value {
    serde_json::json!({
        "max_speed": 250,
        "distance": 500,
        "handler": "auto",
        "stock": "available"
    })
}
