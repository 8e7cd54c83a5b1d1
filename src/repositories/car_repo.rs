//! Car repository backed by the `cars` table.
//!
//! Every mutation is a single statement with `RETURNING`, so "absent" and
//! "already present" are detected atomically by the database itself.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{Car, CarChanges, CarRow, NewCar};
use crate::schema::cars;

/// CRUD over cars keyed by mark.
///
/// `Some` means the row was created, found, updated or deleted; `None`
/// means it was absent (or, for `create`, already present). Errors are only
/// returned for data-access failures.
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Inserts `car` unless its mark is taken. Never overwrites.
    async fn create(&self, car: &Car) -> AppResult<Option<Car>>;

    /// Overwrites every attribute of an existing car. Never inserts.
    async fn update(&self, car: &Car) -> AppResult<Option<Car>>;

    /// Deletes by mark and returns the row as it was before deletion.
    async fn delete_by_id(&self, mark: &str) -> AppResult<Option<Car>>;

    async fn find_by_id(&self, mark: &str) -> AppResult<Option<Car>>;

    /// All cars ordered by mark. Rows that cannot be decoded are skipped.
    async fn select_all(&self) -> AppResult<Vec<Car>>;
}

#[derive(Clone)]
pub struct DieselCarRepository {
    pool: AsyncDbPool,
}

impl DieselCarRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

fn query_error(operation: &'static str) -> impl FnOnce(diesel::result::Error) -> AppError {
    move |e| DatabaseErrorConverter::convert_diesel_error(e, operation)
}

/// A row written by this service always decodes; anything else is corrupt
/// data and reported as a database failure.
fn decode(row: CarRow, operation: &str) -> AppResult<Car> {
    Car::try_from(row).map_err(|e| AppError::Database {
        operation: operation.to_string(),
        source: anyhow::Error::from(e),
    })
}

/// Decodes a listing, skipping rows with NULL columns instead of failing
/// the whole read.
fn decode_listing(rows: Vec<CarRow>) -> Vec<Car> {
    rows.into_iter()
        .filter_map(|row| match Car::try_from(row) {
            Ok(car) => Some(car),
            Err(e) => {
                tracing::warn!(mark = %e.mark, column = e.column, "Skipping undecodable car row");
                None
            }
        })
        .collect()
}

/// The row is gone either way; a legacy row with NULL columns is reported
/// with zero/empty values for them.
fn deleted_snapshot(row: CarRow) -> Car {
    match Car::try_from(row.clone()) {
        Ok(car) => car,
        Err(e) => {
            tracing::warn!(mark = %row.mark, error = %e, "Deleted car row had null columns");
            Car {
                mark: row.mark,
                max_speed: row.max_speed.unwrap_or_default(),
                distance: row.distance.unwrap_or_default(),
                handler: row.handler.unwrap_or_default(),
                stock: row.stock.unwrap_or_default(),
            }
        }
    }
}

#[async_trait]
impl CarRepository for DieselCarRepository {
    async fn create(&self, car: &Car) -> AppResult<Option<Car>> {
        let mut conn = self.pool.get().await?;

        let inserted = diesel::insert_into(cars::table)
            .values(NewCar::from(car))
            .on_conflict(cars::mark)
            .do_nothing()
            .returning(CarRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(query_error("insert car"))?;

        inserted.map(|row| decode(row, "insert car")).transpose()
    }

    async fn update(&self, car: &Car) -> AppResult<Option<Car>> {
        let mut conn = self.pool.get().await?;

        let updated = diesel::update(cars::table.find(car.mark.as_str()))
            .set(CarChanges::from(car))
            .returning(CarRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(query_error("update car"))?;

        updated.map(|row| decode(row, "update car")).transpose()
    }

    async fn delete_by_id(&self, mark: &str) -> AppResult<Option<Car>> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(cars::table.find(mark))
            .returning(CarRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(query_error("delete car"))?;

        Ok(deleted.map(deleted_snapshot))
    }

    async fn find_by_id(&self, mark: &str) -> AppResult<Option<Car>> {
        let mut conn = self.pool.get().await?;

        let found = cars::table
            .find(mark)
            .select(CarRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(query_error("find car"))?;

        found.map(|row| decode(row, "find car")).transpose()
    }

    async fn select_all(&self) -> AppResult<Vec<Car>> {
        let mut conn = self.pool.get().await?;

        let rows = cars::table
            .select(CarRow::as_select())
            .order(cars::mark.asc())
            .load(&mut conn)
            .await
            .map_err(query_error("select cars"))?;

        Ok(decode_listing(rows))
    }
}
