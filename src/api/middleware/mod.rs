//! HTTP middleware: request ids, request logging, bearer guard and the
//! `AppError` response mapping.

mod auth;
mod error_handler;
mod logging;
mod request_id;

pub use auth::auth_middleware;
pub use error_handler::{INTERNAL_ERROR_MESSAGE, handle_path_rejection};
pub use logging::logging_middleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
