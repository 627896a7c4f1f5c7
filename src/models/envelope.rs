//! Normalized wrapper around one API response.

use serde::Serialize;
use serde_json::{Map, Value, json};

/// Key a top-level JSON array is wrapped under.
pub const RESULTS_KEY: &str = "results";
/// Key a non-JSON body is wrapped under.
pub const TEXT_KEY: &str = "text";
/// Key the error message is placed under in failed envelopes.
pub const ERROR_KEY: &str = "error";

/// Result of one lookup, mocked or real.
///
/// Constructed once and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEnvelope {
    data: Value,
    status_code: Option<u16>,
    error: Option<String>,
}

impl ResultEnvelope {
    /// Envelope for a parsed JSON payload.
    ///
    /// Arrays are wrapped as `{"results": [...]}`; objects and scalars pass through.
    pub fn from_json(value: Value, status_code: Option<u16>) -> Self {
        let data = match value {
            Value::Array(items) => {
                let mut wrapped = Map::new();
                wrapped.insert(RESULTS_KEY.to_string(), Value::Array(items));
                Value::Object(wrapped)
            }
            other => other,
        };

        Self {
            data,
            status_code,
            error: None,
        }
    }

    /// Envelope for a raw response body, JSON or not.
    pub fn from_body(body: &str, status_code: Option<u16>) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_json(value, status_code),
            Err(e) => {
                log::debug!("Response body is not JSON ({}), wrapping as text", e);
                Self {
                    data: json!({ TEXT_KEY: body }),
                    status_code,
                    error: None,
                }
            }
        }
    }

    /// Envelope describing a failed lookup.
    pub fn failure(message: impl Into<String>, status_code: Option<u16>) -> Self {
        let message = message.into();
        Self {
            data: json!({ ERROR_KEY: message.as_str() }),
            status_code,
            error: Some(message),
        }
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
