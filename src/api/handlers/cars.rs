//! Car request handlers.
//!
//! Cars are addressed by mark in the path; request bodies never choose the
//! mark.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CAR_TAG;
use crate::api::dto::{CarPayload, CarResponse, ErrorResponse, MessageResponse};
use crate::api::middleware::handle_path_rejection;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

const MARK_MAX_CHARS: usize = 255;

/// Creates the car routes
///
/// # Routes
/// - `GET /stock` - List all cars
/// - `POST /auto/{mark}` - Create a car
/// - `PUT /auto/{mark}` - Replace a car's attributes
/// - `GET /articles/{mark}` - Get one car
/// - `DELETE /articles/{mark}` - Delete one car
pub fn car_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_stock))
        .routes(routes!(create_auto, update_auto))
        .routes(routes!(get_article, delete_article))
}

/// Decoded and length-checked mark from the path.
fn mark_from(path: Result<Path<String>, PathRejection>) -> AppResult<String> {
    let Path(mark) = path.map_err(handle_path_rejection)?;

    let chars = mark.chars().count();
    if chars == 0 || chars > MARK_MAX_CHARS {
        return Err(AppError::Validation {
            field: "mark".to_string(),
            reason: format!("must be between 1 and {} characters", MARK_MAX_CHARS),
        });
    }

    Ok(mark)
}

/// GET /stock - List all cars
#[utoipa::path(
    get,
    path = "/stock",
    tag = CAR_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "All cars ordered by mark", body = Vec<CarResponse>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn get_stock(State(state): State<AppState>) -> AppResult<Json<Vec<CarResponse>>> {
    let cars = state.cars.stock().await?;
    Ok(Json(cars.into_iter().map(CarResponse::from).collect()))
}

/// POST /auto/{mark} - Create a car
#[utoipa::path(
    post,
    path = "/auto/{mark}",
    tag = CAR_TAG,
    security(("bearerAuth" = [])),
    params(("mark" = String, Path, description = "Car mark")),
    request_body = CarPayload,
    responses(
        (status = 201, description = "Auto created", body = MessageResponse),
        (status = 400, description = "Invalid body or mark", body = ErrorResponse),
        (status = 409, description = "Mark already taken", body = ErrorResponse)
    )
)]
async fn create_auto(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    ValidatedJson(payload): ValidatedJson<CarPayload>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let mark = mark_from(path)?;
    state.cars.create(payload.into_car(mark)).await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::new("Auto created"))))
}

/// PUT /auto/{mark} - Replace a car's attributes
#[utoipa::path(
    put,
    path = "/auto/{mark}",
    tag = CAR_TAG,
    security(("bearerAuth" = [])),
    params(("mark" = String, Path, description = "Car mark")),
    request_body = CarPayload,
    responses(
        (status = 200, description = "Auto updated", body = MessageResponse),
        (status = 400, description = "Invalid body or mark", body = ErrorResponse),
        (status = 404, description = "No car with this mark", body = ErrorResponse)
    )
)]
async fn update_auto(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    ValidatedJson(payload): ValidatedJson<CarPayload>,
) -> AppResult<Json<MessageResponse>> {
    let mark = mark_from(path)?;
    state.cars.update(payload.into_car(mark)).await?;
    Ok(Json(MessageResponse::new("Auto updated")))
}

/// GET /articles/{mark} - Get one car
#[utoipa::path(
    get,
    path = "/articles/{mark}",
    tag = CAR_TAG,
    security(("bearerAuth" = [])),
    params(("mark" = String, Path, description = "Car mark")),
    responses(
        (status = 200, description = "The car", body = CarResponse),
        (status = 404, description = "No car with this mark", body = ErrorResponse)
    )
)]
async fn get_article(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Json<CarResponse>> {
    let mark = mark_from(path)?;
    let car = state.cars.get(&mark).await?;
    Ok(Json(CarResponse::from(car)))
}

/// DELETE /articles/{mark} - Delete one car
#[utoipa::path(
    delete,
    path = "/articles/{mark}",
    tag = CAR_TAG,
    security(("bearerAuth" = [])),
    params(("mark" = String, Path, description = "Car mark")),
    responses(
        (status = 200, description = "Auto deleted", body = MessageResponse),
        (status = 404, description = "No car with this mark", body = ErrorResponse)
    )
)]
async fn delete_article(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Json<MessageResponse>> {
    let mark = mark_from(path)?;
    state.cars.delete(&mark).await?;
    Ok(Json(MessageResponse::new("Auto deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_length_limits() {
        assert_eq!(mark_from(Ok(Path("Tesla".to_string()))).unwrap(), "Tesla");
        assert!(mark_from(Ok(Path("ж".repeat(255)))).is_ok());

        match mark_from(Ok(Path("a".repeat(256)))) {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "mark"),
            other => panic!("Expected Validation, got {:?}", other),
        }
        assert!(mark_from(Ok(Path(String::new()))).is_err());
    }
}
