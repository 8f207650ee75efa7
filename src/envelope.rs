//! The uniform JSON wrapper that every response body is sent in.
//!
//! Successful responses look like:
//!
//! ```json
//! {"status": "success", "code": 200, "message": "...", "data": ...}
//! ```
//!
//! and failures look like:
//!
//! ```json
//! {"status": "error", "code": 404, "message": "...", "errors": ...}
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Whether an envelope carries data or errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

/// The `errors` field of an error envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetails {
    /// A single diagnostic message, e.g. from a failed store call.
    Message(String),
    /// Every validation failure, in the order they were found.
    List(Vec<String>),
}

#[derive(Debug, Serialize)]
struct SuccessEnvelope<'a, T> {
    status: EnvelopeStatus,
    code: u16,
    message: &'a str,
    data: T,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    status: EnvelopeStatus,
    code: u16,
    message: &'a str,
    errors: Option<ErrorDetails>,
}

/// Respond with `data` wrapped in a success envelope.
///
/// `message` defaults to the canonical reason phrase of `status`, e.g. "OK".
pub fn success<T: Serialize>(status: StatusCode, message: Option<&str>, data: T) -> Response {
    let envelope = SuccessEnvelope {
        status: EnvelopeStatus::Success,
        code: status.as_u16(),
        message: message.unwrap_or_else(|| reason_phrase(status)),
        data,
    };

    (status, Json(envelope)).into_response()
}

/// Respond with `errors` wrapped in an error envelope.
///
/// `message` defaults to the canonical reason phrase of `status`, e.g. "Not Found".
pub fn error(status: StatusCode, message: Option<&str>, errors: Option<ErrorDetails>) -> Response {
    let envelope = ErrorEnvelope {
        status: EnvelopeStatus::Error,
        code: status.as_u16(),
        message: message.unwrap_or_else(|| reason_phrase(status)),
        errors,
    };

    (status, Json(envelope)).into_response()
}

/// Respond to a request that could not be extracted, e.g. a path that is not
/// valid UTF-8 or a body over the size limit.
///
/// `status` and `body_text` come from the extractor's rejection.
pub fn rejection(status: StatusCode, body_text: String) -> Response {
    error(status, None, Some(ErrorDetails::Message(body_text)))
}

fn reason_phrase(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown Status")
}
