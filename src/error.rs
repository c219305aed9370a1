//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
///
/// Every variant falls into one of three kinds which decide the HTTP status
/// code of the response: validation failures (400), missing resources (404)
/// and storage failures (500).
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A field of a transaction did not satisfy the constraints of the data model,
    /// e.g. an empty description or an amount with too many digits.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// The request could not be parsed, e.g. malformed JSON, a missing field or
    /// a non-integer ID in the path.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The path exists but does not accept the request method.
    #[error("the request method is not allowed for this path")]
    MethodNotAllowed,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

impl Error {
    /// The HTTP status code the error should be reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidTransaction(_) | Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound | Error::UpdateMissingTransaction => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::SqlError(_) | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        (status_code, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
