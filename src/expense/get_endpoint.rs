use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::Response,
};

use crate::{
    envelope,
    expense::{ExpenseId, ExpenseStore},
};

/// A route handler for fetching a single expense by its ID.
pub async fn get_expense_endpoint(
    State(store): State<ExpenseStore>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
) -> Response {
    let Path(expense_id) = match expense_id {
        Ok(expense_id) => expense_id,
        Err(rejection) => return envelope::rejection(rejection.status(), rejection.body_text()),
    };

    match store.get(&expense_id) {
        Ok(expense) => envelope::success(
            StatusCode::OK,
            Some("Expense fetched successfully"),
            expense,
        ),
        Err(error) => error.into_envelope("Failed to fetch expense"),
    }
}
