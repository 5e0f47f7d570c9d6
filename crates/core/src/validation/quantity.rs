//! Numeric form input.

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// A quantity as submitted by a form: either a JSON number or the raw text of
/// an input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Number(serde_json::Number),
    Text(String),
}

impl From<i32> for QuantityInput {
    fn from(value: i32) -> Self {
        QuantityInput::Number(value.into())
    }
}

impl From<&str> for QuantityInput {
    fn from(value: &str) -> Self {
        QuantityInput::Text(value.to_string())
    }
}

/// Parses a required positive whole quantity.
///
/// Missing or blank input is `MissingField`; anything that is not a whole
/// number (fractions, words, out-of-range values) is `NotNumeric`; zero and
/// negative values are `InvalidInput`.
pub fn parse_quantity(input: Option<&QuantityInput>, field: &str) -> Result<i32> {
    let not_numeric = |value: String| {
        Error::Validation(ValidationError::NotNumeric {
            field: field.to_string(),
            value,
        })
    };

    let parsed: i64 = match input {
        None => return Err(ValidationError::MissingField(field.to_string()).into()),
        Some(QuantityInput::Text(text)) if text.trim().is_empty() => {
            return Err(ValidationError::MissingField(field.to_string()).into())
        }
        Some(QuantityInput::Text(text)) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| not_numeric(text.clone()))?,
        Some(QuantityInput::Number(number)) => number
            .as_i64()
            .ok_or_else(|| not_numeric(number.to_string()))?,
    };

    if parsed <= 0 {
        return Err(Error::invalid_input(format!(
            "{} must be greater than zero",
            field
        )));
    }

    i32::try_from(parsed).map_err(|_| not_numeric(parsed.to_string()))
}
