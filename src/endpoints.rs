//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/v1/expenses/{expense_id}', use [format_endpoint].

/// The route for checking that the server is up.
pub const HEALTH: &str = "/api/health";
/// The route to list and add expenses.
pub const EXPENSES: &str = "/api/v1/expenses";
/// The route to fetch, update and delete a single expense.
pub const EXPENSE: &str = "/api/v1/expenses/{expense_id}";
/// The route to summarise expenses, optionally within a date range.
pub const EXPENSE_SUMMARY: &str = "/api/v1/expenses/summary/total";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/expenses/{expense_id}', '{expense_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let param_start = match endpoint_path.find('{') {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints::{self, format_endpoint};

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::HEALTH);
        assert_endpoint_is_valid_uri(endpoints::EXPENSES);
        assert_endpoint_is_valid_uri(endpoints::EXPENSE);
        assert_endpoint_is_valid_uri(endpoints::EXPENSE_SUMMARY);
    }

    #[test]
    fn formats_expense_endpoint() {
        let path = format_endpoint(endpoints::EXPENSE, "0b7e4c1a-9f2d-4e57-8a66-3d1f0c2b9e10");

        assert_eq!(
            path,
            "/api/v1/expenses/0b7e4c1a-9f2d-4e57-8a66-3d1f0c2b9e10"
        );
        assert_endpoint_is_valid_uri(&path);
    }

    #[test]
    fn paths_without_parameter_are_unchanged() {
        assert_eq!(
            format_endpoint(endpoints::EXPENSES, "42"),
            endpoints::EXPENSES
        );
    }
}
