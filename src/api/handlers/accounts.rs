//! Registration and authentication handlers.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{Credentials, ErrorResponse, MessageResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates the account routes
///
/// # Routes
/// - `POST /register` - Register a login
/// - `POST /auth` - Exchange credentials for a bearer token
pub fn account_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(register))
        .routes(routes!(auth))
}

/// POST /register - Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = AUTH_TAG,
    request_body = Credentials,
    responses(
        (status = 201, description = "User created", body = MessageResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 409, description = "Login already registered", body = ErrorResponse)
    )
)]
async fn register(
    State(state): State<AppState>,
    ValidatedJson(credentials): ValidatedJson<Credentials>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state
        .accounts
        .register(&credentials.login, &credentials.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created. Try to auth")),
    ))
}

/// POST /auth - Authenticate and receive a token
///
/// The token is returned as the `message` field.
#[utoipa::path(
    post,
    path = "/auth",
    tag = AUTH_TAG,
    request_body = Credentials,
    responses(
        (status = 201, description = "Token issued", body = MessageResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 401, description = "Wrong password", body = ErrorResponse),
        (status = 404, description = "Unknown login", body = ErrorResponse)
    )
)]
async fn auth(
    State(state): State<AppState>,
    ValidatedJson(credentials): ValidatedJson<Credentials>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let token = state
        .accounts
        .authenticate(&credentials.login, &credentials.password)
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::new(token))))
}
