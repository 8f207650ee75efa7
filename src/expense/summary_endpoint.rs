use axum::{
    body::Bytes,
    extract::{
        Query, State,
        rejection::{BytesRejection, QueryRejection},
    },
    http::StatusCode,
    response::Response,
};

use crate::{
    Error, envelope,
    expense::{
        ExpenseQuery, ExpenseStore,
        summary::{SummaryParams, summarize},
        validation::parse_json_body,
    },
};

const FAILURE_MESSAGE: &str = "Failed to fetch summary";

/// A route handler for summarising expenses, with the date bounds given as
/// the `startDate` and `endDate` query parameters.
pub async fn get_summary_endpoint(
    State(store): State<ExpenseStore>,
    params: Result<Query<SummaryParams>, QueryRejection>,
) -> Response {
    match params {
        Ok(Query(params)) => summary_response(&store, params),
        Err(rejection) => {
            Error::Validation(vec![rejection.body_text()]).into_envelope(FAILURE_MESSAGE)
        }
    }
}

/// A route handler for summarising expenses, with the date bounds given as
/// the `startDate` and `endDate` fields of a JSON body.
pub async fn post_summary_endpoint(
    State(store): State<ExpenseStore>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return envelope::rejection(rejection.status(), rejection.body_text()),
    };

    let params = parse_json_body(&body).and_then(|body| {
        serde_json::from_value::<SummaryParams>(body)
            .map_err(|error| Error::Validation(vec![format!("invalid summary request: {error}")]))
    });

    match params {
        Ok(params) => summary_response(&store, params),
        Err(error) => error.into_envelope(FAILURE_MESSAGE),
    }
}

fn summary_response(store: &ExpenseStore, params: SummaryParams) -> Response {
    let range = match params.date_range() {
        Ok(range) => range,
        Err(error) => return error.into_envelope(FAILURE_MESSAGE),
    };

    let expenses = match store.list(&ExpenseQuery::default()) {
        Ok(expenses) => expenses,
        Err(error) => return error.into_envelope(FAILURE_MESSAGE),
    };

    let mut summary = summarize(&expenses, &range);
    summary.start_date = params.start_date.filter(|date| !date.trim().is_empty());
    summary.end_date = params.end_date.filter(|date| !date.trim().is_empty());

    envelope::success(StatusCode::OK, Some("Summary fetched successfully"), summary)
}
