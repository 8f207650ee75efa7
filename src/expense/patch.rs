//! Partial updates of expenses.

use time::OffsetDateTime;

use crate::{
    expense::{Category, Description, core::timestamp_value},
    kv::{StoreError, UpdateInstruction},
};

/// The fields of an expense that may be changed after it was added.
///
/// Fields set to `None` are left as they are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub description: Option<Description>,
    pub amount: Option<f64>,
    pub category: Option<Category>,
}

impl ExpensePatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.amount.is_none() && self.category.is_none()
    }

    /// Compile the patch into an instruction for the key-value table.
    ///
    /// The instruction sets each field in the patch and always sets
    /// `updatedAt` to `updated_at`, so an empty patch still bumps the timestamp.
    ///
    /// # Errors
    /// Returns [StoreError::Encoding] if `updated_at` cannot be formatted.
    pub fn to_update_instruction(
        &self,
        updated_at: OffsetDateTime,
    ) -> Result<UpdateInstruction, StoreError> {
        let mut instruction = UpdateInstruction::new();

        if let Some(description) = &self.description {
            instruction = instruction.set("description", description.as_str());
        }

        if let Some(amount) = self.amount {
            instruction = instruction.set("amount", amount);
        }

        if let Some(category) = self.category {
            instruction = instruction.set("category", category.as_str());
        }

        Ok(instruction.set("updatedAt", timestamp_value(updated_at)?))
    }
}
