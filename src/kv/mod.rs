//! The key-value table that expenses are persisted in.
//!
//! The table is keyed by a single string attribute, `id`, and stores one JSON
//! document per key. Callers only ever see the [KeyValueTable] trait, so the
//! backing engine can be swapped for a test double.

mod sqlite;
mod update_instruction;

use std::fmt::Debug;

pub use sqlite::{SQLiteTable, TableStatus};
pub use update_instruction::UpdateInstruction;

/// A single stored document, i.e. a mapping of attribute names to JSON values.
pub type Item = serde_json::Map<String, serde_json::Value>;

/// The name of the key attribute shared by every item in a table.
pub const KEY_ATTRIBUTE: &str = "id";

/// Errors originating from operations on a [KeyValueTable].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StoreError {
    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    Sql(#[from] rusqlite::Error),

    /// Could not acquire the lock on the underlying connection.
    #[error("could not acquire the table lock")]
    Lock,

    /// A stored document could not be decoded.
    #[error("the item \"{key}\" is malformed: {reason}")]
    MalformedItem {
        /// The key of the offending item.
        key: String,
        /// Why the item could not be decoded.
        reason: String,
    },

    /// A value could not be encoded for storage.
    #[error("could not encode value for storage: {0}")]
    Encoding(String),

    /// An attribute name cannot be addressed safely in the store's query language.
    #[error("the attribute name {0:?} cannot be used in an update")]
    InvalidAttributeName(String),

    /// An update expression refers to a placeholder with no substitution.
    #[error("the update expression refers to the unknown placeholder {0}")]
    UnresolvedPlaceholder(String),
}

/// A single-partition-key table of JSON documents.
///
/// Each call is atomic for the key it touches, nothing more. Sequences of
/// calls (e.g. get then update) are not transactional.
pub trait KeyValueTable: Debug + Send + Sync {
    /// Get the item stored under `key`, or `None` if there is no such item.
    fn get(&self, key: &str) -> Result<Option<Item>, StoreError>;

    /// Write `item` under `key`, replacing any existing item.
    fn put(&self, key: &str, item: &Item) -> Result<(), StoreError>;

    /// Retrieve every item in the table in the table's native order.
    fn scan(&self) -> Result<Vec<Item>, StoreError>;

    /// Apply `instruction` to the item stored under `key` and return the
    /// updated item, or `None` if there is no such item.
    fn update(&self, key: &str, instruction: &UpdateInstruction)
    -> Result<Option<Item>, StoreError>;

    /// Remove the item stored under `key`.
    ///
    /// Returns `false` if there was no item to remove.
    fn delete(&self, key: &str) -> Result<bool, StoreError>;
}
