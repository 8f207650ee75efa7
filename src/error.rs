//! Defines the app level error type and its conversion to error envelopes.

use axum::{http::StatusCode, response::Response};

use crate::{
    envelope::{self, ErrorDetails},
    kv::StoreError,
};

/// The message sent with every 400 response caused by invalid input.
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";

/// The message sent with every 404 response for a missing expense.
pub const NOT_FOUND_MESSAGE: &str = "Expense not found";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body or query failed validation.
    ///
    /// Holds every problem that was found, in order, so the client can fix
    /// them all at once.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The requested expense was not found.
    ///
    /// The client should check that the ID is correct and that the expense
    /// has not been deleted.
    #[error("the requested expense could not be found")]
    NotFound,

    /// The key-value table failed.
    ///
    /// The underlying message is sent to the client for diagnostics.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    /// Convert the error into an error envelope response.
    ///
    /// `failure_message` is the envelope message for store failures, e.g.
    /// "Failed to add expense". Validation and not-found errors have fixed
    /// messages.
    pub fn into_envelope(self, failure_message: &str) -> Response {
        match self {
            Error::Validation(messages) => envelope::error(
                StatusCode::BAD_REQUEST,
                Some(VALIDATION_FAILED_MESSAGE),
                Some(ErrorDetails::List(messages)),
            ),
            Error::NotFound => {
                envelope::error(StatusCode::NOT_FOUND, Some(NOT_FOUND_MESSAGE), None)
            }
            Error::Store(error) => {
                tracing::error!("{failure_message}: {error}");
                envelope::error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Some(failure_message),
                    Some(ErrorDetails::Message(error.to_string())),
                )
            }
        }
    }
}
