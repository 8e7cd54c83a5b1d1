use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
///
/// Unique violations become `Duplicate` so callers can answer 409; every
/// other failure is an infrastructure `Database` error.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// `NotFound` is not expected here: repositories turn absence into
    /// `Option` before errors are converted. If it still arrives it is
    /// reported as a database failure.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                let text = info.details().unwrap_or_else(|| info.message());
                let key_value = ConstraintParser::extract_key_value(text)
                    .or_else(|| ConstraintParser::extract_key_value(info.message()));
                let table = info
                    .constraint_name()
                    .and_then(ConstraintParser::table_from_constraint)
                    .or_else(|| info.table_name().map(str::to_string))
                    .unwrap_or_else(|| "resource".to_string());

                let message = match key_value {
                    Some((field, value)) => {
                        format!("{} with {} '{}' already exists", table, field, value)
                    }
                    None => format!("{} already exists", table),
                };
                AppError::Duplicate { message }
            }
            DieselError::DatabaseError(_, info) => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!("Database error: {}", info.message())),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: String,
        details: Option<String>,
        constraint_name: Option<String>,
    }

    impl diesel::result::DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            self.details.as_deref()
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn test_convert_unique_violation_on_primary_key() {
        let info = MockDatabaseErrorInfo {
            message: "duplicate key value violates unique constraint \"users_pkey\"".to_string(),
            details: Some("Key (login)=(alice) already exists.".to_string()),
            constraint_name: Some("users_pkey".to_string()),
        };
        let error = DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, Box::new(info));

        match DatabaseErrorConverter::convert_diesel_error(error, "insert user") {
            AppError::Duplicate { message } => {
                assert_eq!(message, "users with login 'alice' already exists");
            }
            other => panic!("Expected Duplicate error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_unique_violation_without_detail() {
        let info = MockDatabaseErrorInfo {
            message: "duplicate key value violates unique constraint".to_string(),
            details: None,
            constraint_name: None,
        };
        let error = DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, Box::new(info));

        match DatabaseErrorConverter::convert_diesel_error(error, "insert car") {
            AppError::Duplicate { message } => assert_eq!(message, "resource already exists"),
            other => panic!("Expected Duplicate error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_other_database_error() {
        let info = MockDatabaseErrorInfo {
            message: "relation \"cars\" does not exist".to_string(),
            details: None,
            constraint_name: None,
        };
        let error = DieselError::DatabaseError(DatabaseErrorKind::Unknown, Box::new(info));

        match DatabaseErrorConverter::convert_diesel_error(error, "select cars") {
            AppError::Database { operation, source } => {
                assert_eq!(operation, "select cars");
                assert!(source.to_string().contains("does not exist"));
            }
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_not_found_is_database_error() {
        let result = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find");
        assert!(matches!(result, AppError::Database { .. }));
    }
}
