//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::Response,
    routing::get,
};

use crate::{
    AppState, endpoints, envelope,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, edit_expense_endpoint,
        get_expense_endpoint, get_summary_endpoint, list_expenses_endpoint,
        post_summary_endpoint,
    },
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(
            endpoints::EXPENSES,
            get(list_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(
            endpoints::EXPENSE_SUMMARY,
            get(get_summary_endpoint).post(post_summary_endpoint),
        )
        .route(
            endpoints::EXPENSE,
            get(get_expense_endpoint)
                .patch(edit_expense_endpoint)
                .delete(delete_expense_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Report that the server is up.
async fn get_health() -> Response {
    envelope::success(StatusCode::OK, Some("Service is healthy"), ())
}
