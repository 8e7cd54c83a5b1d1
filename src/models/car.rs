use diesel::prelude::*;
use thiserror::Error;

/// A car offered by the dealership, identified by its mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub mark: String,
    pub max_speed: i32,
    pub distance: i32,
    pub handler: String,
    pub stock: String,
}

/// Raw `cars` row.
///
/// Every column but `mark` is nullable in the table, so rows are read into
/// this shape first and converted with `Car::try_from`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::cars)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CarRow {
    pub mark: String,
    pub max_speed: Option<i32>,
    pub distance: Option<i32>,
    pub handler: Option<String>,
    pub stock: Option<String>,
}

/// A stored row that cannot be represented as a [`Car`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("car '{mark}' has no value for column '{column}'")]
pub struct CarDecodeError {
    pub mark: String,
    pub column: &'static str,
}

impl TryFrom<CarRow> for Car {
    type Error = CarDecodeError;

    fn try_from(row: CarRow) -> Result<Self, Self::Error> {
        let missing = |column| CarDecodeError {
            mark: row.mark.clone(),
            column,
        };

        Ok(Car {
            max_speed: row.max_speed.ok_or_else(|| missing("max_speed"))?,
            distance: row.distance.ok_or_else(|| missing("distance"))?,
            handler: row.handler.ok_or_else(|| missing("handler"))?,
            stock: row.stock.ok_or_else(|| missing("stock"))?,
            mark: row.mark,
        })
    }
}

/// Insert form of a car
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::cars)]
pub struct NewCar<'a> {
    pub mark: &'a str,
    pub max_speed: i32,
    pub distance: i32,
    pub handler: &'a str,
    pub stock: &'a str,
}

impl<'a> From<&'a Car> for NewCar<'a> {
    fn from(car: &'a Car) -> Self {
        Self {
            mark: &car.mark,
            max_speed: car.max_speed,
            distance: car.distance,
            handler: &car.handler,
            stock: &car.stock,
        }
    }
}

/// Columns overwritten by an update; the mark is the key and never changes
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::cars)]
pub struct CarChanges<'a> {
    pub max_speed: i32,
    pub distance: i32,
    pub handler: &'a str,
    pub stock: &'a str,
}

impl<'a> From<&'a Car> for CarChanges<'a> {
    fn from(car: &'a Car) -> Self {
        Self {
            max_speed: car.max_speed,
            distance: car.distance,
            handler: &car.handler,
            stock: &car.stock,
        }
    }
}
