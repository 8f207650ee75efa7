//! Expense management for the expense tracker.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and the validated types it is built from
//! - Validation of request bodies and query filters
//! - The `ExpenseStore` that maps expense operations onto a key-value table
//! - Spending summaries
//! - The route handlers for the expense API

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod get_endpoint;
mod list_endpoint;
mod patch;
mod query;
mod store;
mod summary;
mod summary_endpoint;
mod validation;

pub use core::{
    Category, Description, DescriptionError, Expense, ExpenseId, NewExpense, UnknownCategory,
};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::{DeletedExpense, delete_expense_endpoint};
pub use edit_endpoint::edit_expense_endpoint;
pub use get_endpoint::get_expense_endpoint;
pub use list_endpoint::list_expenses_endpoint;
pub use patch::ExpensePatch;
pub use query::ExpenseQuery;
pub use store::{Clock, ExpenseStore, system_clock};
pub use summary::{CategoryTotal, DateRange, Summary, SummaryParams, summarize};
pub use summary_endpoint::{get_summary_endpoint, post_summary_endpoint};
pub use validation::{
    NO_FIELDS_MESSAGE, parse_json_body, validate_expense_patch, validate_new_expense,
};
