use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderValue, header};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Message returned for bodies that are not the expected JSON document
pub const INVALID_JSON: &str = "Provided json is invalid";

/// JSON body extractor that also runs `validator` rules.
///
/// A body sent without `Content-Type` is read as JSON. Malformed JSON, a
/// non-JSON content type or missing fields answer 400
/// `Provided json is invalid`; rule violations answer 400 naming the field.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(mut req: Request, state: &S) -> AppResult<Self> {
        req.headers_mut()
            .entry(header::CONTENT_TYPE)
            .or_insert(HeaderValue::from_static("application/json"));

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection, "Rejected request body");
                AppError::bad_request(INVALID_JSON)
            })?;

        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
