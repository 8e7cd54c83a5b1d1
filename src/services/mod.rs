//! Service layer for business logic operations.
//!
//! Services turn repository outcomes into business outcomes and typed
//! errors, and sit between the repositories and the handlers.

mod account_service;
mod car_service;

pub use account_service::{AccountService, INVALID_PASSWORD, USER_EXISTS, USER_NOT_FOUND};
pub use car_service::{CAR_EXISTS, CAR_NOT_FOUND, CAR_NOT_FOUND_FOR_UPDATE, CarService};
