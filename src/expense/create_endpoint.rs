use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::Response,
};

use crate::{
    envelope,
    expense::{
        ExpenseStore,
        validation::{parse_json_body, validate_new_expense},
    },
};

const FAILURE_MESSAGE: &str = "Failed to add expense";

/// A route handler for adding an expense, responds with the new expense.
///
/// The body is validated before the store is touched.
pub async fn create_expense_endpoint(
    State(store): State<ExpenseStore>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return envelope::rejection(rejection.status(), rejection.body_text()),
    };

    let new_expense = match parse_json_body(&body).and_then(|body| validate_new_expense(&body)) {
        Ok(new_expense) => new_expense,
        Err(error) => return error.into_envelope(FAILURE_MESSAGE),
    };

    match store.add(new_expense) {
        Ok(expense) => envelope::success(
            StatusCode::CREATED,
            Some("Expense added successfully"),
            expense,
        ),
        Err(error) => error.into_envelope(FAILURE_MESSAGE),
    }
}
