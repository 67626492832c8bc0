//! Response envelope shared by all commands

use crate::error::{Result, TautulliError};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Base response wrapper for all Tautulli API calls
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TautulliResponse<T> {
    /// Response data payload
    pub response: TautulliResponseData<T>,
}

/// Inner response data structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TautulliResponseData<T> {
    /// Result status (success, error)
    pub result: String,
    /// Optional message (usually present on errors)
    pub message: Option<String>,
    /// The actual data payload
    pub data: Option<T>,
}

impl<T> TautulliResponse<T> {
    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.response.result == "success"
    }

    /// Get error message, if any
    pub fn message(&self) -> Option<&str> {
        self.response.message.as_deref()
    }

    /// Get the data payload, if present
    pub fn data(self) -> Option<T> {
        self.response.data
    }

    /// The data payload, or an API error when the result is not `success`
    pub fn into_data(self) -> Result<Option<T>> {
        if self.is_success() {
            return Ok(self.response.data);
        }
        let message = self
            .response
            .message
            .unwrap_or_else(|| format!("result was {:?}", self.response.result));
        Err(TautulliError::api(message))
    }
}

/// Deserialize an integer that Tautulli may send as a number or a numeric string
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientI64;

    impl<'de> Visitor<'de> for LenientI64 {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer, a numeric string, or null")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
            i64::try_from(v).map(Some).map_err(E::custom)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
            Ok(Some(v as i64))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
            let v = v.trim();
            if v.is_empty() {
                return Ok(None);
            }
            v.parse::<i64>().map(Some).map_err(E::custom)
        }

        fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(LenientI64)
}
