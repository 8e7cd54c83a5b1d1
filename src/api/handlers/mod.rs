//! HTTP request handlers, organized by resource.

pub mod accounts;
pub mod cars;
pub mod health;
