//! Response envelope decoding.
//!
//! Every API response is wrapped as `{ "data": ..., "success"?: bool,
//! "message"?: string }`. This module turns raw bodies into typed payloads and
//! turns failures into [`FolioError::Api`] with the server's message when one
//! is present.

use crate::domain::error::{FolioError, Result, GENERIC_FAILURE};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// The wrapping object returned by the API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    /// Parses a body, tolerating an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::MalformedEnvelope`] if the body is not a JSON
    /// object.
    pub fn parse(body: &str) -> Result<Self> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(body).map_err(|e| FolioError::MalformedEnvelope(e.to_string()))
    }

    /// Rejects envelopes that explicitly report `success: false`.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Api`] carrying the envelope message.
    pub fn ensure_success(self, status: u16) -> Result<Self> {
        if self.success == Some(false) {
            return Err(FolioError::Api {
                status,
                message: self.message.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            });
        }
        Ok(self)
    }

    /// Decodes `data` as a list.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::MalformedEnvelope`] when `data` is absent, is not
    /// an array, or holds items of the wrong shape.
    pub fn into_list<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        match self.data {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| {
                    serde_json::from_value(item)
                        .map_err(|e| FolioError::MalformedEnvelope(format!("bad list item: {e}")))
                })
                .collect(),
            Some(other) => Err(FolioError::MalformedEnvelope(format!(
                "expected an array under `data`, found {}",
                kind_of(&other)
            ))),
            None => Err(FolioError::MalformedEnvelope(
                "response has no `data` field".to_string(),
            )),
        }
    }

    /// Decodes `data` as a single item, if present and non-null.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::MalformedEnvelope`] when `data` has the wrong
    /// shape.
    pub fn into_item<T: DeserializeOwned>(self) -> Result<Option<T>> {
        match self.data {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| FolioError::MalformedEnvelope(e.to_string())),
        }
    }
}

/// Builds the error for a non-success HTTP status.
#[must_use]
pub fn error_from_body(status: u16, body: &str) -> FolioError {
    let message = serde_json::from_str::<Envelope>(body)
        .ok()
        .and_then(|envelope| envelope.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_string());
    FolioError::Api { status, message }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
