//! An expense tracker REST API.
//!
//! Expenses are recorded with a description, an amount and a category, and
//! can be listed, searched, updated, deleted and summarised over date ranges.
//! Every response body is wrapped in a uniform JSON [envelope].
//!
//! Expenses are kept in a key-value table, see [kv], which is backed by SQLite.

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
pub mod config;
pub mod endpoints;
pub mod envelope;
mod error;
pub mod expense;
pub mod kv;
mod logging;
mod not_found;
mod routing;
#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use error::{Error, NOT_FOUND_MESSAGE, VALIDATION_FAILED_MESSAGE};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

/// How long in-flight requests get to finish once shutdown starts.
const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(1);

/// Wait for ctrl+c or, on Unix, SIGTERM and then tell the server behind
/// `handle` to stop accepting connections and drain.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal_name = tokio::select! {
        _ = ctrl_c => "ctrl+c",
        _ = terminate => "terminate",
    };

    tracing::info!("Received {signal_name} signal, shutting down");
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE_PERIOD));
}
