//! Car service: repository outcomes to business outcomes.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::Car;
use crate::repositories::Store;

pub const CAR_EXISTS: &str = "Auto with that mark already exists";
pub const CAR_NOT_FOUND_FOR_UPDATE: &str = "Auto with that mark not found";
pub const CAR_NOT_FOUND: &str = "Car with that mark does not exist in database";

/// Cloning is cheap; the store is shared behind an `Arc`.
#[derive(Clone)]
pub struct CarService {
    store: Arc<dyn Store>,
}

impl CarService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Lists every decodable car, ordered by mark.
    pub async fn stock(&self) -> AppResult<Vec<Car>> {
        self.store.cars().select_all().await
    }

    /// Creates a car under a fresh mark.
    ///
    /// # Errors
    /// `Duplicate` when the mark is taken; the stored car is left untouched.
    pub async fn create(&self, car: Car) -> AppResult<Car> {
        match self.store.cars().create(&car).await? {
            Some(created) => {
                tracing::info!(mark = %created.mark, "Car created");
                Ok(created)
            }
            None => {
                tracing::info!(mark = %car.mark, "Rejected car with existing mark");
                Err(AppError::duplicate(CAR_EXISTS))
            }
        }
    }

    /// Overwrites the attributes of an existing car.
    ///
    /// # Errors
    /// `NotFound` when no car has this mark; nothing is inserted.
    pub async fn update(&self, car: Car) -> AppResult<Car> {
        match self.store.cars().update(&car).await? {
            Some(updated) => {
                tracing::info!(mark = %updated.mark, "Car updated");
                Ok(updated)
            }
            None => {
                tracing::info!(mark = %car.mark, "Rejected update of unknown car");
                Err(AppError::not_found(CAR_NOT_FOUND_FOR_UPDATE))
            }
        }
    }

    pub async fn get(&self, mark: &str) -> AppResult<Car> {
        self.store
            .cars()
            .find_by_id(mark)
            .await?
            .ok_or_else(|| AppError::not_found(CAR_NOT_FOUND))
    }

    /// Deletes a car and returns it as it was.
    pub async fn delete(&self, mark: &str) -> AppResult<Car> {
        match self.store.cars().delete_by_id(mark).await? {
            Some(deleted) => {
                tracing::info!(mark = %deleted.mark, "Car deleted");
                Ok(deleted)
            }
            None => {
                tracing::info!(mark = %mark, "Rejected delete of unknown car");
                Err(AppError::not_found(CAR_NOT_FOUND))
            }
        }
    }
}
