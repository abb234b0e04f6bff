// JSON input decoding for tool arguments

use serde_json::{Map, Value};

use super::error::{Result, StoreError};
use super::types::{QueryParams, SqlValue};

/// Map a JSON value onto the SQLite type it binds as.
///
/// Arrays and objects are stored as their compact JSON text.
pub fn json_to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                SqlValue::Integer(i)
            } else {
                SqlValue::Real(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => SqlValue::Text(s.clone()),
        Value::Array(_) | Value::Object(_) => SqlValue::Text(value.to_string()),
    }
}

fn parse_json(text: &str, arg: &str) -> Result<Value> {
    serde_json::from_str(text)
        .map_err(|e| StoreError::Decode(format!("invalid JSON in {}: {}", arg, e)))
}

/// Decode the `data` argument of insert/update: must be a non-empty JSON object.
pub fn parse_row_data(text: &str, arg: &str) -> Result<Map<String, Value>> {
    match parse_json(text, arg)? {
        Value::Object(map) if map.is_empty() => Err(StoreError::Decode(format!(
            "{} must contain at least one column",
            arg
        ))),
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::Decode(format!("{} must be a JSON object", arg))),
    }
}

/// Decode optional bind parameters: a JSON array binds positionally, an object by name.
pub fn parse_params(text: Option<&str>) -> Result<QueryParams> {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(QueryParams::None);
    };

    match parse_json(text, "params")? {
        Value::Null => Ok(QueryParams::None),
        Value::Array(items) => Ok(QueryParams::Positional(
            items.iter().map(json_to_sql).collect(),
        )),
        Value::Object(map) => Ok(QueryParams::Named(
            map.iter()
                .map(|(key, value)| (named_parameter(key), json_to_sql(value)))
                .collect(),
        )),
        _ => Err(StoreError::Decode(
            "params must be a JSON array or object".to_string(),
        )),
    }
}

fn named_parameter(key: &str) -> String {
    if key.starts_with([':', '@', '$']) {
        key.to_string()
    } else {
        format!(":{}", key)
    }
}
