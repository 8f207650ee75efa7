//! Validation of the JSON bodies used to create and update expenses.
//!
//! Validation never stops at the first problem: every field is checked and
//! every violation is reported in a single [Error::Validation].

use serde_json::{Map, Value};

use crate::{
    Error,
    expense::{Category, Description, ExpensePatch, NewExpense},
};

/// The message reported when an update body sets no fields.
pub const NO_FIELDS_MESSAGE: &str = "No valid fields provided for update";

const DESCRIPTION: &str = "description";
const AMOUNT: &str = "amount";
const CATEGORY: &str = "category";
const KNOWN_FIELDS: [&str; 3] = [DESCRIPTION, AMOUNT, CATEGORY];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Presence {
    Required,
    Optional,
}

/// Parse a request body as JSON.
///
/// An empty body is treated as an empty object.
///
/// # Errors
/// Returns an [Error::Validation] if `body` is not valid JSON.
pub fn parse_json_body(body: &[u8]) -> Result<Value, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_slice(body)
        .map_err(|error| Error::Validation(vec![format!("body must be valid JSON: {error}")]))
}

/// Validate the body of a request to add an expense.
///
/// `description` and `amount` are required, `category` defaults to
/// [Category::Other].
///
/// # Errors
/// Returns an [Error::Validation] listing every problem with `body`.
pub fn validate_new_expense(body: &Value) -> Result<NewExpense, Error> {
    let object = expect_object(body)?;
    let mut errors = Vec::new();

    let description = read_description(object, Presence::Required, &mut errors);
    let amount = read_amount(object, Presence::Required, &mut errors);
    let category = read_category(object, &mut errors);
    reject_unknown_fields(object, &mut errors);

    match (description, amount) {
        (Some(description), Some(amount)) if errors.is_empty() => Ok(NewExpense {
            description,
            amount,
            category: category.unwrap_or_default(),
        }),
        _ => Err(Error::Validation(errors)),
    }
}

/// Validate the body of a request to update an expense.
///
/// Every field is optional, but at least one must be given.
///
/// # Errors
/// Returns an [Error::Validation] listing every problem with `body`, or
/// containing [NO_FIELDS_MESSAGE] if `body` is an empty object.
pub fn validate_expense_patch(body: &Value) -> Result<ExpensePatch, Error> {
    let object = expect_object(body)?;
    let mut errors = Vec::new();

    let patch = ExpensePatch {
        description: read_description(object, Presence::Optional, &mut errors),
        amount: read_amount(object, Presence::Optional, &mut errors),
        category: read_category(object, &mut errors),
    };
    reject_unknown_fields(object, &mut errors);

    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }

    if patch.is_empty() {
        return Err(Error::Validation(vec![NO_FIELDS_MESSAGE.to_owned()]));
    }

    Ok(patch)
}

fn expect_object(body: &Value) -> Result<&Map<String, Value>, Error> {
    body.as_object()
        .ok_or_else(|| Error::Validation(vec!["\"value\" must be of type object".to_owned()]))
}

fn read_description(
    object: &Map<String, Value>,
    presence: Presence,
    errors: &mut Vec<String>,
) -> Option<Description> {
    match object.get(DESCRIPTION) {
        None => {
            require(DESCRIPTION, presence, errors);
            None
        }
        Some(Value::String(text)) => Description::new(text)
            .map_err(|error| errors.push(error.to_string()))
            .ok(),
        Some(_) => {
            errors.push(format!("\"{DESCRIPTION}\" must be a string"));
            None
        }
    }
}

fn read_amount(
    object: &Map<String, Value>,
    presence: Presence,
    errors: &mut Vec<String>,
) -> Option<f64> {
    let value = match object.get(AMOUNT) {
        None => {
            require(AMOUNT, presence, errors);
            return None;
        }
        Some(value) => value,
    };

    // Numeric strings such as "12.50" are accepted and converted.
    let amount = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|amount| amount.is_finite());

    match amount {
        Some(amount) if amount > 0.0 => Some(amount),
        Some(_) => {
            errors.push(format!("\"{AMOUNT}\" must be a positive number"));
            None
        }
        None => {
            errors.push(format!("\"{AMOUNT}\" must be a number"));
            None
        }
    }
}

fn read_category(object: &Map<String, Value>, errors: &mut Vec<String>) -> Option<Category> {
    let value = object.get(CATEGORY)?;

    let category = value.as_str().and_then(|name| name.parse::<Category>().ok());

    if category.is_none() {
        let names: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        errors.push(format!(
            "\"{CATEGORY}\" must be one of [{}]",
            names.join(", ")
        ));
    }

    category
}

fn reject_unknown_fields(object: &Map<String, Value>, errors: &mut Vec<String>) {
    for key in object.keys() {
        if !KNOWN_FIELDS.contains(&key.as_str()) {
            errors.push(format!("\"{key}\" is not allowed"));
        }
    }
}

fn require(field: &str, presence: Presence, errors: &mut Vec<String>) {
    if presence == Presence::Required {
        errors.push(format!("\"{field}\" is required"));
    }
}
