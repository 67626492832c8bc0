//! Query parameter encoding
//!
//! Parameter records are plain structs deriving [`serde::Serialize`]. Each field
//! becomes one query pair named after the field (or its `#[serde(rename)]`). Fields
//! marked `#[serde(skip_serializing_if = "is_zero")]` are left out when they hold
//! their type's zero value; every other field is sent, even when empty.
//!
//! ```
//! use serde::Serialize;
//! use tautulli_client::params::{encode_parameters, is_zero};
//!
//! #[derive(Serialize)]
//! struct Lookup {
//!     user_id: i64,
//!     #[serde(skip_serializing_if = "is_zero")]
//!     search: String,
//! }
//!
//! let encoded = encode_parameters(Some(&Lookup { user_id: 7, search: String::new() })).unwrap();
//! assert_eq!(encoded, "user_id=7");
//! ```

use crate::error::{Result, TautulliError};
use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

/// True when `value` equals its type's default; use with `skip_serializing_if`
pub fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Encode a parameter record as a query string fragment with keys in sorted order
///
/// `None` encodes to an empty string.
pub fn encode_parameters<P>(params: Option<&P>) -> Result<String>
where
    P: Serialize + ?Sized,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in parameter_pairs(params)? {
        serializer.append_pair(&key, &value);
    }
    Ok(serializer.finish())
}

/// Flatten a parameter record into sorted `(key, value)` pairs
pub fn parameter_pairs<P>(params: Option<&P>) -> Result<Vec<(String, String)>>
where
    P: Serialize + ?Sized,
{
    let Some(params) = params else {
        return Ok(Vec::new());
    };

    let value = serde_json::to_value(params).map_err(|e| {
        TautulliError::encoding_with_source("Parameters could not be serialized", e)
    })?;

    let fields = match value {
        Value::Object(fields) => fields,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(TautulliError::encoding(format!(
                "Parameters must be a record of named fields, got {}",
                value_kind(&other)
            )))
        }
    };

    let mut pairs = Vec::with_capacity(fields.len());
    for (key, value) in fields {
        let rendered = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
            nested @ (Value::Array(_) | Value::Object(_)) => {
                return Err(TautulliError::encoding(format!(
                    "Field `{}` is {}, only scalar values can be encoded",
                    key,
                    value_kind(&nested)
                )))
            }
        };
        pairs.push((key, rendered));
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(pairs)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a map",
    }
}
