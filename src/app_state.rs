//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{Error, expense::ExpenseStore, kv::SQLiteTable};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The store that expenses are added to and read from.
    pub expense_store: ExpenseStore,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will create the table `table_name` if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the table cannot be created.
    pub fn new(db_connection: Connection, table_name: &str) -> Result<Self, Error> {
        let table = SQLiteTable::new(Arc::new(Mutex::new(db_connection)), table_name);
        table.ensure_exists()?;

        Ok(Self::from_store(ExpenseStore::new(Arc::new(table))))
    }

    /// Create a new [AppState] around an existing store.
    pub fn from_store(expense_store: ExpenseStore) -> Self {
        Self { expense_store }
    }
}

impl FromRef<AppState> for ExpenseStore {
    fn from_ref(state: &AppState) -> Self {
        state.expense_store.clone()
    }
}
