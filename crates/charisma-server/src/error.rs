//! Error to HTTP status mapping
//!
//! | Error | Status |
//! |-------|--------|
//! | `InvalidArgument`, `Json` | 400 |
//! | `Authentication` | 401 |
//! | `NotFound` | 404 |
//! | `Conflict` | 409 |
//! | anything else | 500 |

use charisma_domain::error::Error;
use rocket::http::Status;
use serde_json::{Value, json};
use tracing::error;

use crate::constants::INTERNAL_ERROR_MESSAGE;

/// HTTP status for an error raised while handling a request
pub fn status_for(err: &Error) -> Status {
    match err {
        Error::InvalidArgument { .. } | Error::Json { .. } => Status::BadRequest,
        Error::Authentication { .. } => Status::Unauthorized,
        Error::NotFound { .. } => Status::NotFound,
        Error::Conflict { .. } => Status::Conflict,
        _ => Status::InternalServerError,
    }
}

/// Status and `{"error": ...}` body for a request error
///
/// Server errors are logged with their full chain and answered with a
/// generic message.
pub fn error_reply(err: &Error) -> (Status, Value) {
    let status = status_for(err);
    let message = if status.code >= 500 {
        error!(error = %err, "Request failed");
        INTERNAL_ERROR_MESSAGE.to_string()
    } else {
        err.to_string()
    };
    (status, json!({ "error": message }))
}
