use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{"message": ...}` body of every successful mutation.
///
/// For `/auth` the message is the issued token.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
