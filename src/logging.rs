//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use crate::envelope;

/// The number of bytes of a body that is logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated
/// and the full body is logged at the `debug` level.
///
/// Request bodies are buffered under axum's default body limit (2 MB), so a
/// larger body is answered with a 413 error envelope before any handler runs.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body = match Bytes::from_request(Request::new(body), &()).await {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!(
                "Could not read request body for {} {}: {rejection}",
                parts.method, parts.uri
            );
            return envelope::rejection(rejection.status(), rejection.body_text());
        }
    };
    log_body("Received request", &parts, &body);

    let response = next.run(Request::from_parts(parts, Body::from(body))).await;

    let (parts, body) = response.into_parts();
    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(body) => body,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return envelope::error(StatusCode::INTERNAL_SERVER_ERROR, None, None);
        }
    };
    log_body("Sending response", &parts, &body);

    Response::from_parts(parts, Body::from(body))
}

fn log_body(event: &str, parts: &impl std::fmt::Debug, body: &Bytes) {
    let text = String::from_utf8_lossy(body);

    match truncate(&text) {
        Some(head) => {
            tracing::info!("{event}: {parts:#?}\nbody: {head}...");
            tracing::debug!("Full body: {text:?}");
        }
        None => tracing::info!("{event}: {parts:#?}\nbody: {text:?}"),
    }
}

/// Cut `text` down to at most [LOG_BODY_LENGTH_LIMIT] bytes on a character
/// boundary, or `None` if it already fits.
fn truncate(text: &str) -> Option<&str> {
    if text.len() <= LOG_BODY_LENGTH_LIMIT {
        return None;
    }

    let mut end = LOG_BODY_LENGTH_LIMIT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    Some(&text[..end])
}
