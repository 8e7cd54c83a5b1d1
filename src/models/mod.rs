mod car;
mod user;

pub use car::{Car, CarChanges, CarDecodeError, CarRow, NewCar};
pub use user::User;
