use axum::{
    body::Bytes,
    extract::{
        Path, State,
        rejection::{BytesRejection, PathRejection},
    },
    http::StatusCode,
    response::Response,
};

use crate::{
    envelope,
    expense::{
        ExpenseId, ExpenseStore,
        validation::{parse_json_body, validate_expense_patch},
    },
};

const FAILURE_MESSAGE: &str = "Failed to update expense";

/// A route handler for partially updating an expense.
///
/// The body is validated before the store is touched, so an invalid body
/// gets a 400 response even if the expense does not exist.
pub async fn edit_expense_endpoint(
    State(store): State<ExpenseStore>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let Path(expense_id) = match expense_id {
        Ok(expense_id) => expense_id,
        Err(rejection) => return envelope::rejection(rejection.status(), rejection.body_text()),
    };
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return envelope::rejection(rejection.status(), rejection.body_text()),
    };

    let patch = match parse_json_body(&body).and_then(|body| validate_expense_patch(&body)) {
        Ok(patch) => patch,
        Err(error) => return error.into_envelope(FAILURE_MESSAGE),
    };

    match store.update(&expense_id, &patch) {
        Ok(expense) => envelope::success(
            StatusCode::OK,
            Some("Expense updated successfully"),
            expense,
        ),
        Err(error) => error.into_envelope(FAILURE_MESSAGE),
    }
}
