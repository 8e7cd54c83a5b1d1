//! Bearer token guard for the car routes.
//!
//! Active only when `api.require_auth` is set; otherwise requests pass
//! through untouched.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Validates `Authorization: Bearer <token>` against the state's issuer.
///
/// # Errors
/// Returns 401 Unauthorized if:
/// - Authorization header is missing
/// - The header is not a bearer token
/// - Signature or expiry checks fail
///
/// # Example
/// ```ignore
/// OpenApiRouter::new()
///     .routes(routes!(get_stock))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
/// ```
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !state.require_auth {
        return Ok(next.run(request).await);
    }

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::unauthorized("Invalid authorization header format. Expected: Bearer <token>")
    })?;

    let claims = state.tokens.validate(token)?;
    tracing::debug!(login = %claims.sub, "Bearer token accepted");

    Ok(next.run(request).await)
}
