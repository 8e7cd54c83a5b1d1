use std::fmt;

use diesel::prelude::*;

/// Registered account.
///
/// `password` holds the Argon2id PHC string, never the plaintext.
#[derive(Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub login: String,
    pub password: String,
}

impl User {
    pub fn new(login: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password_hash.into(),
        }
    }
}

// Keep hashes out of logs
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}
