use axum::{http::StatusCode, response::Response};

use crate::envelope;

/// The fallback handler for requests that match no route.
pub async fn get_404_not_found() -> Response {
    envelope::error(StatusCode::NOT_FOUND, Some("Route not found"), None)
}
