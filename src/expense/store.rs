//! Translates expense operations into calls on a [KeyValueTable].

use std::{fmt::Debug, sync::Arc};

use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    Error,
    expense::{Expense, ExpenseId, ExpensePatch, ExpenseQuery, NewExpense},
    kv::{Item, KEY_ATTRIBUTE, KeyValueTable, StoreError},
};

/// A source of the current time, used to stamp `createdAt` and `updatedAt`.
pub type Clock = Arc<dyn Fn() -> OffsetDateTime + Send + Sync>;

/// The clock used outside of tests: the current time in UTC.
pub fn system_clock() -> Clock {
    Arc::new(OffsetDateTime::now_utc)
}

/// Adds, lists, fetches, updates and deletes expenses.
///
/// Update and delete first check that the expense exists and then act on it.
/// The two steps are separate table calls, so an expense deleted in between
/// by a concurrent request is reported as not found by the second step.
#[derive(Clone)]
pub struct ExpenseStore {
    table: Arc<dyn KeyValueTable>,
    clock: Clock,
}

impl Debug for ExpenseStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseStore")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl ExpenseStore {
    /// Create a store over `table` that stamps records with the system clock.
    pub fn new(table: Arc<dyn KeyValueTable>) -> Self {
        Self::with_clock(table, system_clock())
    }

    /// Create a store over `table` that stamps records with `clock`.
    pub fn with_clock(table: Arc<dyn KeyValueTable>, clock: Clock) -> Self {
        Self { table, clock }
    }

    /// Add a new expense with a freshly generated ID.
    ///
    /// `createdAt` and `updatedAt` are both set to the current time.
    ///
    /// # Errors
    /// Returns an [Error::Store] if the expense could not be written.
    pub fn add(&self, new_expense: NewExpense) -> Result<Expense, Error> {
        let id = Uuid::new_v4().to_string();
        let expense = new_expense.into_expense(id, (self.clock)());

        self.table.put(&expense.id, &encode_expense(&expense)?)?;
        tracing::debug!("Added expense {}", expense.id);

        Ok(expense)
    }

    /// Retrieve the expenses that match `query`, in the table's native order.
    ///
    /// # Errors
    /// Returns an [Error::Store] if the table could not be scanned or holds
    /// an item that is not an expense.
    pub fn list(&self, query: &ExpenseQuery) -> Result<Vec<Expense>, Error> {
        let expenses = self
            .table
            .scan()?
            .into_iter()
            .map(decode_expense)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(expenses
            .into_iter()
            .filter(|expense| query.matches(expense))
            .collect())
    }

    /// Retrieve the expense with the ID `id`.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if there is no such expense, or an
    /// [Error::Store] if the table call fails.
    pub fn get(&self, id: &str) -> Result<Expense, Error> {
        match self.table.get(id)? {
            Some(item) => Ok(decode_expense(item)?),
            None => Err(Error::NotFound),
        }
    }

    /// Apply `patch` to the expense with the ID `id` and return the result.
    ///
    /// Fields not in the patch keep their values and `updatedAt` is set to
    /// the current time.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if there is no such expense, or an
    /// [Error::Store] if a table call fails.
    pub fn update(&self, id: &str, patch: &ExpensePatch) -> Result<Expense, Error> {
        self.get(id)?;

        let instruction = patch.to_update_instruction((self.clock)())?;
        tracing::debug!(
            "Updating expense {id}: {} {:?}",
            instruction.expression(),
            instruction.names()
        );

        match self.table.update(id, &instruction)? {
            Some(item) => Ok(decode_expense(item)?),
            None => Err(Error::NotFound),
        }
    }

    /// Delete the expense with the ID `id` and return its ID.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if there is no such expense, or an
    /// [Error::Store] if a table call fails.
    pub fn delete(&self, id: &str) -> Result<ExpenseId, Error> {
        self.get(id)?;

        if self.table.delete(id)? {
            Ok(id.to_owned())
        } else {
            Err(Error::NotFound)
        }
    }
}

fn encode_expense(expense: &Expense) -> Result<Item, StoreError> {
    match serde_json::to_value(expense) {
        Ok(Value::Object(item)) => Ok(item),
        Ok(other) => Err(StoreError::Encoding(format!(
            "expected an expense to encode as a JSON object, got {other}"
        ))),
        Err(error) => Err(StoreError::Encoding(error.to_string())),
    }
}

fn decode_expense(item: Item) -> Result<Expense, StoreError> {
    let key = item
        .get(KEY_ATTRIBUTE)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();

    serde_json::from_value(Value::Object(item)).map_err(|error| StoreError::MalformedItem {
        key,
        reason: error.to_string(),
    })
}
