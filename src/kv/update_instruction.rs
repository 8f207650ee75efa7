//! Partial update instructions for items in a [KeyValueTable](super::KeyValueTable).

use std::collections::BTreeMap;

use serde_json::Value;

use super::StoreError;

/// An instruction to set a number of attributes on a stored item.
///
/// Attribute names and values are never written into the expression itself.
/// Instead, each assignment refers to a name placeholder (`#n0`) and a value
/// placeholder (`:v0`) that are resolved through [UpdateInstruction::names]
/// and [UpdateInstruction::values]. This means attribute names that clash with
/// reserved words in a store's query language are always safe to use.
///
/// ```
/// use expense_tracker::kv::UpdateInstruction;
///
/// let instruction = UpdateInstruction::new()
///     .set("description", "Bus fare")
///     .set("amount", 4.5);
///
/// assert_eq!(instruction.expression(), "SET #n0 = :v0, #n1 = :v1");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateInstruction {
    assignments: Vec<(String, String)>,
    names: BTreeMap<String, String>,
    values: BTreeMap<String, Value>,
}

impl UpdateInstruction {
    /// Create an instruction that sets nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an assignment of `value` to `attribute`.
    pub fn set(mut self, attribute: &str, value: impl Into<Value>) -> Self {
        let index = self.assignments.len();
        let name_placeholder = format!("#n{index}");
        let value_placeholder = format!(":v{index}");

        self.names
            .insert(name_placeholder.clone(), attribute.to_owned());
        self.values.insert(value_placeholder.clone(), value.into());
        self.assignments.push((name_placeholder, value_placeholder));

        self
    }

    /// Whether the instruction contains no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// The update expression, e.g. `SET #n0 = :v0, #n1 = :v1`.
    ///
    /// An empty instruction has an empty expression.
    pub fn expression(&self) -> String {
        if self.assignments.is_empty() {
            return String::new();
        }

        let clauses: Vec<String> = self
            .assignments
            .iter()
            .map(|(name, value)| format!("{name} = {value}"))
            .collect();

        format!("SET {}", clauses.join(", "))
    }

    /// The substitutions for the name placeholders in [Self::expression].
    pub fn names(&self) -> &BTreeMap<String, String> {
        &self.names
    }

    /// The substitutions for the value placeholders in [Self::expression].
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Resolve every assignment into an `(attribute, value)` pair, in the order
    /// they were added.
    ///
    /// # Errors
    /// Returns [StoreError::UnresolvedPlaceholder] if a placeholder has no
    /// substitution.
    pub fn assignments(&self) -> Result<Vec<(&str, &Value)>, StoreError> {
        self.assignments
            .iter()
            .map(|(name, value)| {
                let attribute = self
                    .names
                    .get(name)
                    .ok_or_else(|| StoreError::UnresolvedPlaceholder(name.clone()))?;
                let value = self
                    .values
                    .get(value)
                    .ok_or_else(|| StoreError::UnresolvedPlaceholder(value.clone()))?;

                Ok((attribute.as_str(), value))
            })
            .collect()
    }
}
