//! Turning typed text into cell values

use datagrid_core::{GridError, Result, Value, ValueType};

/// Coerce editor text to a value of the column's type.
///
/// Number columns parse the trimmed text; blank text clears the cell.
/// Every other type keeps the text as a string.
pub fn coerce_input(text: &str, value_type: ValueType) -> Result<Value> {
    match value_type {
        ValueType::Number => parse_number(text),
        ValueType::Text | ValueType::Email | ValueType::Date => {
            Ok(Value::String(text.to_string()))
        }
    }
}

fn parse_number(text: &str) -> Result<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Ok(Value::Int64(int));
    }
    match trimmed.parse::<f64>() {
        Ok(float) if float.is_finite() => Ok(Value::Float64(float)),
        _ => Err(GridError::InvalidNumber(text.to_string())),
    }
}

/// Whether writing `new` over `existing` would change what the cell shows.
///
/// Numbers compare by value across integer and float; text compares with
/// the display text of the other side, so NULL and an empty string match.
pub fn values_equal(existing: &Value, new: &Value) -> bool {
    match (existing, new) {
        (Value::Int64(_) | Value::Float64(_), Value::Int64(_) | Value::Float64(_)) => {
            existing.as_f64() == new.as_f64()
        }
        (_, Value::String(s)) => existing.display_text() == *s,
        (Value::String(s), _) => *s == new.display_text(),
        _ => existing == new,
    }
}
