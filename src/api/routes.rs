//! Router configuration for the API.
//!
//! Collects the handler routes together with their OpenAPI annotations and
//! applies the middleware stack.

use axum::{Json, Router, middleware, routing::get};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::api::doc::{ApiDoc, OPENAPI_PATH};
use crate::api::handlers;
use crate::api::middleware::{auth_middleware, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. CORS
/// 2. Request ID - generates/propagates `x-request-id`
/// 3. Logging - span and outcome per request, tagged with the request ID
/// 4. Bearer guard - car routes only, and only when `require_auth` is set
///
/// # Routes
/// - `/stock`, `/auto/{mark}`, `/articles/{mark}` - cars
/// - `/register`, `/auth` - accounts
/// - `/health` - health check
/// - `/api-docs/openapi.json` - OpenAPI document
pub fn create_router(state: AppState) -> Router {
    let cars = handlers::cars::car_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    let (router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(cars)
        .merge(handlers::accounts::account_routes())
        .merge(handlers::health::health_routes())
        .split_for_parts();

    router
        .route(
            OPENAPI_PATH,
            get(move || {
                let openapi = openapi.clone();
                async move { Json(openapi) }
            }),
        )
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
