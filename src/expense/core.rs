//! Defines the core data models for expenses.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use unicode_segmentation::UnicodeSegmentation;

use crate::kv::StoreError;

/// The opaque identifier of an expense.
pub type ExpenseId = String;

/// Money that was spent, e.g., on a coffee or a bus ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// The ID of the expense, generated when the expense is added.
    pub id: ExpenseId,
    /// A text description of what the money was spent on.
    pub description: Description,
    /// The amount of money spent. Always positive.
    pub amount: f64,
    /// What kind of spending this was.
    #[serde(default)]
    pub category: Category,
    /// When the expense was added. Never changes.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the expense was last added or updated.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The validated fields needed to add an expense.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub description: Description,
    pub amount: f64,
    pub category: Category,
}

impl NewExpense {
    /// Turn the fields into a full expense with the given `id`, stamped at `now`.
    pub fn into_expense(self, id: ExpenseId, now: OffsetDateTime) -> Expense {
        Expense {
            id,
            description: self.description,
            amount: self.amount,
            category: self.category,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The kinds of spending an expense can be filed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Utilities,
    #[default]
    Other,
}

impl Category {
    /// Every category, in the order they are listed to users.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Other,
    ];

    /// The name of the category as it appears in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Other => "Other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// The string did not name a [Category].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("\"{0}\" is not a category")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// Why a string could not be used as a [Description].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DescriptionError {
    #[error("\"description\" is not allowed to be empty")]
    Empty,
    #[error("\"description\" length must be at least {} characters long", Description::MIN_LENGTH)]
    TooShort,
    #[error(
        "\"description\" length must be less than or equal to {} characters long",
        Description::MAX_LENGTH
    )]
    TooLong,
}

/// A validated expense description between [Description::MIN_LENGTH] and
/// [Description::MAX_LENGTH] characters long.
///
/// Length is counted in grapheme clusters so that, e.g., an emoji with a skin
/// tone modifier counts as one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    /// The fewest characters a description may have.
    pub const MIN_LENGTH: usize = 3;
    /// The most characters a description may have.
    pub const MAX_LENGTH: usize = 100;

    /// Create a description.
    ///
    /// # Errors
    /// Returns a [DescriptionError] if `text` is empty, too short or too long.
    pub fn new(text: &str) -> Result<Self, DescriptionError> {
        let length = text.graphemes(true).count();

        if text.is_empty() {
            Err(DescriptionError::Empty)
        } else if length < Self::MIN_LENGTH {
            Err(DescriptionError::TooShort)
        } else if length > Self::MAX_LENGTH {
            Err(DescriptionError::TooLong)
        } else {
            Ok(Self(text.to_owned()))
        }
    }

    /// Create a description without validation.
    ///
    /// The caller should ensure the length is within bounds.
    pub fn new_unchecked(text: &str) -> Self {
        Self(text.to_owned())
    }

    /// The description text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Description {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Format `at` the way timestamps are stored, as an RFC 3339 JSON string.
///
/// # Errors
/// Returns [StoreError::Encoding] if `at` cannot be represented in RFC 3339,
/// e.g. years past 9999.
pub(crate) fn timestamp_value(at: OffsetDateTime) -> Result<Value, StoreError> {
    at.format(&Rfc3339)
        .map(Value::String)
        .map_err(|error| StoreError::Encoding(error.to_string()))
}
