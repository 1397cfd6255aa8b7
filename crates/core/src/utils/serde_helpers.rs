//! Serde utility helpers for loosely typed settings values

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes an optional value into its textual form.
///
/// Settings files are edited by hand, so `"cmd": 42` is accepted and read as
/// `"42"`. Strings pass through unchanged, numbers and booleans are rendered,
/// and `null` is treated as absent. Arrays and objects are rejected.
pub fn coerce_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string, found {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
