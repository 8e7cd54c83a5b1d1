//! Repository layer for data access operations.
//!
//! One trait per entity with a single diesel-async implementation each,
//! all reachable through a [`Store`].

mod car_repo;
mod store;
mod user_repo;

pub use car_repo::{CarRepository, DieselCarRepository};
pub use store::{PgStore, Store};
pub use user_repo::{DieselUserRepository, UserRepository};
