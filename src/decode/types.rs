//! Raw payload types
//!
//! Splits a decoded response body into its top-level sections.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};

/// The top-level sections of a response body, before any mapping
///
/// Only lives for the duration of a parse. Every section is optional;
/// keys other than the four below are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPayload {
    /// Primary records: an object (singular endpoints) or an array
    pub data: Option<JsonValue>,
    /// Pagination metadata
    pub meta: Option<JsonValue>,
    /// Side-loaded expansions keyed by category name
    pub includes: Option<JsonValue>,
    /// Partial-failure error objects
    pub errors: Option<JsonValue>,
}

impl RawPayload {
    /// Decode a response body
    ///
    /// Fails with `MalformedResponse` when the body is not JSON or its
    /// top-level value is not an object.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: JsonValue = serde_json::from_slice(body)
            .map_err(|e| Error::malformed(format!("Failed to parse JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Decode a response body given as text
    pub fn from_text(body: &str) -> Result<Self> {
        Self::from_slice(body.as_bytes())
    }

    /// Split an already-decoded value
    pub fn from_value(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(object) => Ok(Self::from_object(object)),
            other => Err(Error::malformed(format!(
                "Expected a JSON object at the top level, found {}",
                json_type_name(&other)
            ))),
        }
    }

    fn from_object(mut object: JsonObject) -> Self {
        // An explicit null is the same as an absent section
        let mut section = |key: &str| object.remove(key).filter(|v| !v.is_null());
        Self {
            data: section("data"),
            meta: section("meta"),
            includes: section("includes"),
            errors: section("errors"),
        }
    }
}

/// Name of a JSON value's type, for error messages
pub(crate) fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
