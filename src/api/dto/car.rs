//! Car DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Car;

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating or replacing a car.
///
/// The mark comes from the path; a `mark` field in the body is ignored.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CarPayload {
    #[validate(range(min = 0, message = "must not be negative"))]
    #[schema(minimum = 0, example = 250)]
    pub max_speed: i32,
    #[validate(range(min = 0, message = "must not be negative"))]
    #[schema(minimum = 0, example = 500)]
    pub distance: i32,
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    #[schema(min_length = 1, max_length = 255, example = "auto")]
    pub handler: String,
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    #[schema(min_length = 1, max_length = 255, example = "available")]
    pub stock: String,
}

impl CarPayload {
    pub fn into_car(self, mark: String) -> Car {
        Car {
            mark,
            max_speed: self.max_speed,
            distance: self.distance,
            handler: self.handler,
            stock: self.stock,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CarResponse {
    #[schema(example = "Tesla")]
    pub mark: String,
    pub max_speed: i32,
    pub distance: i32,
    pub handler: String,
    pub stock: String,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self {
            mark: car.mark,
            max_speed: car.max_speed,
            distance: car.distance,
            handler: car.handler,
            stock: car.stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> CarPayload {
        CarPayload {
            max_speed: 250,
            distance: 500,
            handler: "auto".to_string(),
            stock: "available".to_string(),
        }
    }

    #[test]
    fn test_valid_payload() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn test_negative_speed_rejected() {
        let mut p = payload();
        p.max_speed = -1;
        let errors = p.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("max_speed"));
    }

    #[test]
    fn test_empty_and_long_strings_rejected() {
        let mut p = payload();
        p.handler = String::new();
        p.stock = "x".repeat(256);
        let errors = p.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("handler"));
        assert!(fields.contains_key("stock"));
    }

    #[test]
    fn test_body_mark_is_ignored() {
        let p: CarPayload = serde_json::from_str(
            r#"{"mark":"Lada","max_speed":1,"distance":2,"handler":"h","stock":"s"}"#,
        )
        .unwrap();
        let car = p.into_car("Tesla".to_string());
        assert_eq!(car.mark, "Tesla");
    }

    #[test]
    fn test_response_shape() {
        let json = serde_json::to_value(CarResponse::from(payload().into_car("Tesla".into()))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "mark": "Tesla",
                "max_speed": 250,
                "distance": 500,
                "handler": "auto",
                "stock": "available"
            })
        );
    }
}
