//! Filtering of the expense list.

use serde::{Deserialize, Serialize};

use crate::expense::Expense;

/// Narrows the expense list down by a search term and/or a category.
///
/// When both are given an expense matches if it matches *either* of them.
/// Empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseQuery {
    /// A case-sensitive substring of the ID, category or description, or a
    /// number equal to the amount.
    pub search: Option<String>,
    /// The exact name of a category.
    pub category: Option<String>,
}

impl ExpenseQuery {
    /// Whether `expense` should be included in the list.
    pub fn matches(&self, expense: &Expense) -> bool {
        let search = non_empty(&self.search);
        let category = non_empty(&self.category);

        if search.is_none() && category.is_none() {
            return true;
        }

        search.is_some_and(|term| matches_search(expense, term))
            || category.is_some_and(|category| expense.category.as_str() == category)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

fn matches_search(expense: &Expense, term: &str) -> bool {
    expense.id.contains(term)
        || expense.category.as_str().contains(term)
        || expense.description.as_str().contains(term)
        || term
            .trim()
            .parse::<f64>()
            .is_ok_and(|number| number == expense.amount)
}
