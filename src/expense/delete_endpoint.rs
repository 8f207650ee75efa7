use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::{
    envelope,
    expense::{ExpenseId, ExpenseStore},
};

/// The data sent back after an expense is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedExpense {
    pub deleted_id: ExpenseId,
}

/// A route handler for deleting an expense by its ID.
pub async fn delete_expense_endpoint(
    State(store): State<ExpenseStore>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
) -> Response {
    let Path(expense_id) = match expense_id {
        Ok(expense_id) => expense_id,
        Err(rejection) => return envelope::rejection(rejection.status(), rejection.body_text()),
    };

    match store.delete(&expense_id) {
        Ok(deleted_id) => envelope::success(
            StatusCode::OK,
            Some("Expense deleted successfully"),
            DeletedExpense { deleted_id },
        ),
        Err(error) => error.into_envelope("Failed to delete expense"),
    }
}
