use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::Response,
};

use crate::{
    Error, envelope,
    expense::{ExpenseQuery, ExpenseStore},
};

const FAILURE_MESSAGE: &str = "Failed to fetch expenses";

/// A route handler for listing expenses, optionally filtered by the `search`
/// and `category` query parameters.
///
/// No matches is an empty list, not an error.
pub async fn list_expenses_endpoint(
    State(store): State<ExpenseStore>,
    query: Result<Query<ExpenseQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return Error::Validation(vec![rejection.body_text()]).into_envelope(FAILURE_MESSAGE);
        }
    };

    tracing::debug!("Fetching expenses matching {query:?}");

    match store.list(&query) {
        Ok(expenses) => envelope::success(
            StatusCode::OK,
            Some("Expenses fetched successfully"),
            expenses,
        ),
        Err(error) => error.into_envelope(FAILURE_MESSAGE),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::{
        endpoints,
        expense::{Category, Description, ExpenseStore, NewExpense},
        test_utils::{FailingTable, must_create_test_server, must_create_test_store},
    };

    fn add(store: &ExpenseStore, description: &str, amount: f64, category: Category) -> String {
        store
            .add(NewExpense {
                description: Description::new_unchecked(description),
                amount,
                category,
            })
            .expect("could not add test expense")
            .id
    }

    fn ids(body: &Value) -> Vec<String> {
        let mut ids: Vec<String> = body["data"]
            .as_array()
            .expect("data is not a list")
            .iter()
            .map(|expense| expense["id"].as_str().unwrap().to_owned())
            .collect();
        ids.sort();
        ids
    }

    #[tokio::test]
    async fn empty_table_gives_empty_list() {
        let server = must_create_test_server(must_create_test_store());

        let response = server.get(endpoints::EXPENSES).await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({
                "status": "success",
                "code": 200,
                "message": "Expenses fetched successfully",
                "data": []
            })
        );
    }

    #[tokio::test]
    async fn lists_all_expenses_without_filters() {
        let store = must_create_test_store();
        let mut want = vec![
            add(&store, "Coffee", 4.5, Category::Food),
            add(&store, "Bus fare", 3.0, Category::Transport),
        ];
        want.sort();
        let server = must_create_test_server(store);

        let response = server.get(endpoints::EXPENSES).await;

        response.assert_status_ok();
        assert_eq!(ids(&response.json::<Value>()), want);
    }

    #[tokio::test]
    async fn search_matches_amount_and_description() {
        let store = must_create_test_store();
        let mut want = vec![
            add(&store, "Dinner", 42.5, Category::Food),
            add(&store, "Paid 42.5 at the market", 13.0, Category::Other),
        ];
        want.sort();
        add(&store, "Cinema", 18.0, Category::Entertainment);
        let server = must_create_test_server(store);

        let response = server
            .get(endpoints::EXPENSES)
            .add_query_param("search", "42.5")
            .await;

        response.assert_status_ok();
        assert_eq!(ids(&response.json::<Value>()), want);
    }

    #[tokio::test]
    async fn search_or_category() {
        let store = must_create_test_store();
        let mut want = vec![
            add(&store, "Bus fare", 3.0, Category::Transport),
            add(&store, "Lunch", 15.0, Category::Food),
        ];
        want.sort();
        add(&store, "Electricity", 80.0, Category::Utilities);
        let server = must_create_test_server(store);

        let response = server
            .get(endpoints::EXPENSES)
            .add_query_param("search", "Bus")
            .add_query_param("category", "Food")
            .await;

        response.assert_status_ok();
        assert_eq!(ids(&response.json::<Value>()), want);
    }

    #[tokio::test]
    async fn no_matches_is_ok_with_empty_list() {
        let store = must_create_test_store();
        add(&store, "Coffee", 4.5, Category::Food);
        let server = must_create_test_server(store);

        let response = server
            .get(endpoints::EXPENSES)
            .add_query_param("category", "Transport")
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"], json!([]));
    }

    #[tokio::test]
    async fn store_failure_is_internal_server_error() {
        let server = must_create_test_server(ExpenseStore::new(Arc::new(FailingTable)));

        let response = server.get(endpoints::EXPENSES).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>()["message"],
            "Failed to fetch expenses"
        );
    }
}
