use regex::Regex;
use std::sync::OnceLock;

/// Pulls structured details out of PostgreSQL constraint violation messages.
pub struct ConstraintParser;

/// Matches "Key (field)=(value)" in PostgreSQL DETAIL lines
static KEY_VALUE: OnceLock<Option<Regex>> = OnceLock::new();

impl ConstraintParser {
    fn key_value() -> Option<&'static Regex> {
        KEY_VALUE
            .get_or_init(|| Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").ok())
            .as_ref()
    }

    /// Extracts `(field, value)` from a unique violation message.
    ///
    /// PostgreSQL reports the detail either inside the message or in the
    /// separate `details` field, so both are tried.
    ///
    /// # Examples
    /// ```
    /// use dealership::error::ConstraintParser;
    ///
    /// let detail = "Key (login)=(alice) already exists.";
    /// assert_eq!(
    ///     ConstraintParser::extract_key_value(detail),
    ///     Some(("login".to_string(), "alice".to_string()))
    /// );
    /// ```
    pub fn extract_key_value(text: &str) -> Option<(String, String)> {
        let captures = Self::key_value()?.captures(text)?;
        let field = captures.get(1)?.as_str().to_string();
        let value = captures.get(2)?.as_str().to_string();
        Some((field, value))
    }

    /// Derives the table name from a constraint name such as `users_pkey`
    /// or `cars_mark_key`.
    pub fn table_from_constraint(constraint: &str) -> Option<String> {
        let stripped = constraint
            .strip_suffix("_pkey")
            .or_else(|| constraint.strip_suffix("_key"))?;

        // For `<table>_<column>_key` keep the leading segment only
        let table = if constraint.ends_with("_pkey") {
            stripped
        } else {
            stripped.split('_').next()?
        };

        if table.is_empty() {
            None
        } else {
            Some(table.to_string())
        }
    }
}
