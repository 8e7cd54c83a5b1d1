//! Account DTOs for registration and authentication.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Request body for `/register` and `/auth`.
#[derive(Deserialize, ToSchema, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    #[schema(min_length = 1, max_length = 255, example = "alice")]
    pub login: String,
    #[validate(length(min = 1, max = 128, message = "must be between 1 and 128 characters"))]
    #[schema(format = "password", min_length = 1, max_length = 128)]
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits() {
        let ok = Credentials {
            login: "alice".into(),
            password: "x".repeat(128),
        };
        assert!(ok.validate().is_ok());

        let too_long = Credentials {
            login: "alice".into(),
            password: "x".repeat(129),
        };
        assert!(too_long.validate().unwrap_err().field_errors().contains_key("password"));

        let empty_login = Credentials {
            login: String::new(),
            password: "pw".into(),
        };
        assert!(empty_login.validate().unwrap_err().field_errors().contains_key("login"));
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = Credentials {
            login: "alice".into(),
            password: "hunter2".into(),
        };
        assert!(!format!("{:?}", creds).contains("hunter2"));
    }
}
