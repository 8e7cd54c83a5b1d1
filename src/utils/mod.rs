//! Password hashing, token signing and request validation helpers.

pub mod jwt;
pub mod password;
pub mod validate;
