#![allow(missing_docs)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicI64, Ordering},
};

use axum::{body::Body, http::Response};
use axum_test::TestServer;
use rusqlite::Connection;
use serde_json::Value;
use time::{Duration, macros::datetime};

use crate::{
    AppState, build_router,
    expense::{Clock, ExpenseStore},
    kv::{Item, KeyValueTable, SQLiteTable, StoreError, UpdateInstruction},
};

/// A table that fails every call, as if the database were unreachable.
#[derive(Debug)]
pub(crate) struct FailingTable;

impl FailingTable {
    fn error() -> StoreError {
        StoreError::Sql(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_IOERR),
            Some("disk I/O error".to_owned()),
        ))
    }
}

impl KeyValueTable for FailingTable {
    fn get(&self, _key: &str) -> Result<Option<Item>, StoreError> {
        Err(Self::error())
    }

    fn put(&self, _key: &str, _item: &Item) -> Result<(), StoreError> {
        Err(Self::error())
    }

    fn scan(&self) -> Result<Vec<Item>, StoreError> {
        Err(Self::error())
    }

    fn update(
        &self,
        _key: &str,
        _instruction: &UpdateInstruction,
    ) -> Result<Option<Item>, StoreError> {
        Err(Self::error())
    }

    fn delete(&self, _key: &str) -> Result<bool, StoreError> {
        Err(Self::error())
    }
}

/// A clock that starts at 2025-01-01 and moves one second forward per reading.
pub(crate) fn stepping_clock() -> Clock {
    let ticks = Arc::new(AtomicI64::new(0));

    Arc::new(move || {
        let tick = ticks.fetch_add(1, Ordering::SeqCst);
        datetime!(2025-01-01 00:00 UTC) + Duration::seconds(tick)
    })
}

#[track_caller]
pub(crate) fn must_create_test_table() -> Arc<SQLiteTable> {
    let connection =
        Connection::open_in_memory().expect("could not create in-memory SQLite database");
    let table = SQLiteTable::new(Arc::new(Mutex::new(connection)), "expense-tracker");
    table.ensure_exists().expect("could not create test table");

    Arc::new(table)
}

#[track_caller]
pub(crate) fn must_create_test_store() -> ExpenseStore {
    ExpenseStore::with_clock(must_create_test_table(), stepping_clock())
}

#[track_caller]
pub(crate) fn must_create_test_server(store: ExpenseStore) -> TestServer {
    TestServer::new(build_router(AppState::from_store(store)))
        .expect("Could not create test server.")
}

pub(crate) async fn parse_json_response(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read response body");

    serde_json::from_slice(&body).expect("Response body is not JSON")
}
