//! A [KeyValueTable] backed by a table in a SQLite database.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, params_from_iter};
use serde_json::Value;

use super::{Item, KEY_ATTRIBUTE, KeyValueTable, StoreError, UpdateInstruction};

/// Whether [SQLiteTable::ensure_exists] had to create the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    /// The table was missing and has been created.
    Created,
    /// The table was already there.
    AlreadyExists,
}

/// Stores JSON documents in a two column SQLite table, `id` and `item`.
#[derive(Debug, Clone)]
pub struct SQLiteTable {
    connection: Arc<Mutex<Connection>>,
    table_name: String,
}

impl SQLiteTable {
    /// Create a handle to the table `table_name`.
    ///
    /// The table is not created here, call [SQLiteTable::ensure_exists] for that.
    pub fn new(connection: Arc<Mutex<Connection>>, table_name: &str) -> Self {
        Self {
            connection,
            table_name: table_name.to_owned(),
        }
    }

    /// Create the table if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error if the lock cannot be acquired or there is an SQL error.
    pub fn ensure_exists(&self) -> Result<TableStatus, StoreError> {
        let connection = self.lock()?;

        let exists: bool = connection.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            [&self.table_name],
            |row| row.get(0),
        )?;

        if exists {
            tracing::info!("Table \"{}\" already exists.", self.table_name);
            return Ok(TableStatus::AlreadyExists);
        }

        tracing::warn!("Table \"{}\" not found. Creating...", self.table_name);
        connection.execute(
            &format!(
                "CREATE TABLE {} (
                    id TEXT PRIMARY KEY NOT NULL,
                    item TEXT NOT NULL
                )",
                self.quoted_name()
            ),
            (),
        )?;
        tracing::info!("Table \"{}\" created successfully.", self.table_name);

        Ok(TableStatus::Created)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.connection.lock().map_err(|error| {
            tracing::error!("Could not acquire database lock: {error}");
            StoreError::Lock
        })
    }

    fn quoted_name(&self) -> String {
        quote_identifier(&self.table_name)
    }
}

impl KeyValueTable for SQLiteTable {
    fn get(&self, key: &str) -> Result<Option<Item>, StoreError> {
        let connection = self.lock()?;

        let text: Option<String> = connection
            .prepare(&format!(
                "SELECT item FROM {} WHERE id = ?1",
                self.quoted_name()
            ))?
            .query_row([key], |row| row.get(0))
            .optional()?;

        text.map(|text| decode_item(key, &text)).transpose()
    }

    fn put(&self, key: &str, item: &Item) -> Result<(), StoreError> {
        let text = serde_json::to_string(item)
            .map_err(|error| StoreError::Encoding(error.to_string()))?;
        let connection = self.lock()?;

        connection.execute(
            &format!(
                "INSERT OR REPLACE INTO {} (id, item) VALUES (?1, ?2)",
                self.quoted_name()
            ),
            (key, text),
        )?;

        Ok(())
    }

    fn scan(&self) -> Result<Vec<Item>, StoreError> {
        let connection = self.lock()?;

        let rows = connection
            .prepare(&format!("SELECT id, item FROM {}", self.quoted_name()))?
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        rows.iter()
            .map(|(key, text)| decode_item(key, text))
            .collect()
    }

    fn update(
        &self,
        key: &str,
        instruction: &UpdateInstruction,
    ) -> Result<Option<Item>, StoreError> {
        let assignments = instruction.assignments()?;

        if assignments.is_empty() {
            return self.get(key);
        }

        // Attribute paths and values are bound as parameters, pairwise, so
        // nothing from the instruction is spliced into the SQL text.
        let mut json_set_arguments = Vec::with_capacity(assignments.len());
        let mut parameters = Vec::with_capacity(assignments.len() * 2 + 1);

        for (attribute, value) in assignments {
            let path_index = parameters.len() + 1;
            json_set_arguments.push(format!("?{}, json(?{})", path_index, path_index + 1));
            parameters.push(json_path(attribute)?);
            parameters.push(encode_value(value)?);
        }

        let key_index = parameters.len() + 1;
        parameters.push(key.to_owned());

        let sql = format!(
            "UPDATE {} SET item = json_set(item, {}) WHERE id = ?{} RETURNING item",
            self.quoted_name(),
            json_set_arguments.join(", "),
            key_index
        );

        let connection = self.lock()?;
        let text: Option<String> = connection
            .prepare(&sql)?
            .query_row(params_from_iter(parameters.iter()), |row| row.get(0))
            .optional()?;

        text.map(|text| decode_item(key, &text)).transpose()
    }

    fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let connection = self.lock()?;

        let rows_affected = connection.execute(
            &format!("DELETE FROM {} WHERE id = ?1", self.quoted_name()),
            [key],
        )?;

        Ok(rows_affected > 0)
    }
}

fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Build the SQLite JSON path addressing the top-level `attribute`.
///
/// The key attribute cannot be updated.
fn json_path(attribute: &str) -> Result<String, StoreError> {
    if attribute.is_empty() || attribute == KEY_ATTRIBUTE || attribute.contains(['"', '\\']) {
        return Err(StoreError::InvalidAttributeName(attribute.to_owned()));
    }

    Ok(format!("$.\"{attribute}\""))
}

fn encode_value(value: &Value) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|error| StoreError::Encoding(error.to_string()))
}

fn decode_item(key: &str, text: &str) -> Result<Item, StoreError> {
    serde_json::from_str(text).map_err(|error| StoreError::MalformedItem {
        key: key.to_owned(),
        reason: error.to_string(),
    })
}
