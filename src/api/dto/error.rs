//! Error response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{"error": ...}` body of every failed request.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ErrorResponse {
    #[schema(example = "Auto with that mark already exists")]
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn validation_error(field: &str, reason: &str) -> Self {
        Self::new(format!("{}: {}", field, reason))
    }
}
