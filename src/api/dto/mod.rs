//! Data transfer objects for API requests and responses.

mod account;
mod car;
mod error;
mod health;
mod message;

pub use account::Credentials;
pub use car::{CarPayload, CarResponse};
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use message::MessageResponse;
