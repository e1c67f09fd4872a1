//! Entity view abstractions
//!
//! Every modeled resource is an explicit struct of known fields plus a single
//! side map of everything it does not model. [`FieldBag`] moves known fields
//! out of a decoded JSON object with type checks; whatever is left over
//! (unknown keys, and known keys whose value had the wrong shape) becomes the
//! entity's `extra` map, so no input is ever lost.

use crate::types::{JsonObject, JsonValue};
use tracing::debug;

/// Core trait for typed views over decoded JSON records
pub trait Entity: Sized {
    /// Resource kind, used in log output
    const KIND: &'static str;

    /// Build the entity by taking its known fields out of the bag
    fn from_fields(fields: FieldBag) -> Self;

    /// Fields that were present in the record but not modeled
    fn extra(&self) -> &JsonObject;

    /// Build the entity from a JSON object
    fn from_object(object: JsonObject) -> Self {
        Self::from_fields(FieldBag::new(Self::KIND, object))
    }

    /// Build the entity from any JSON value
    ///
    /// A value that is not an object yields an entity whose fields are all
    /// absent instead of failing.
    fn from_value(value: JsonValue) -> Self {
        match value {
            JsonValue::Object(object) => Self::from_object(object),
            other => {
                debug!(
                    kind = Self::KIND,
                    value = %other,
                    "Record is not a JSON object, mapping to an empty entity"
                );
                Self::from_object(JsonObject::new())
            }
        }
    }

    /// Look up an unmodeled field by name
    fn raw(&self, name: &str) -> Option<&JsonValue> {
        self.extra().get(name)
    }
}

/// A decoded JSON object that typed fields are taken out of
#[derive(Debug, Clone)]
pub struct FieldBag {
    kind: &'static str,
    fields: JsonObject,
}

impl FieldBag {
    /// Wrap a JSON object for the given resource kind
    pub fn new(kind: &'static str, fields: JsonObject) -> Self {
        Self { kind, fields }
    }

    /// Check whether a key is present (any value, including null)
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Remove `key` and convert it; on a shape mismatch the original value
    /// goes back into the bag and `None` is returned.
    fn take_with<T>(
        &mut self,
        key: &str,
        convert: impl FnOnce(JsonValue) -> Result<T, JsonValue>,
    ) -> Option<T> {
        let value = self.fields.remove(key)?;
        match convert(value) {
            Ok(converted) => Some(converted),
            Err(original) => {
                if !original.is_null() {
                    debug!(
                        kind = self.kind,
                        field = key,
                        value = %original,
                        "Unexpected field shape, keeping raw value"
                    );
                }
                self.fields.insert(key.to_string(), original);
                None
            }
        }
    }

    /// Take a string field
    pub fn take_string(&mut self, key: &str) -> Option<String> {
        self.take_with(key, |value| match value {
            JsonValue::String(s) => Ok(s),
            other => Err(other),
        })
    }

    /// Take an identifier, accepting either a string or an integer
    pub fn take_id(&mut self, key: &str) -> Option<String> {
        self.take_with(key, |value| match value {
            JsonValue::String(s) => Ok(s),
            JsonValue::Number(n) if n.is_u64() || n.is_i64() => Ok(n.to_string()),
            other => Err(other),
        })
    }

    /// Take a boolean field
    pub fn take_bool(&mut self, key: &str) -> Option<bool> {
        self.take_with(key, |value| match value {
            JsonValue::Bool(b) => Ok(b),
            other => Err(other),
        })
    }

    /// Take a non-negative integer field
    pub fn take_u64(&mut self, key: &str) -> Option<u64> {
        self.take_with(key, |value| match value.as_u64() {
            Some(n) => Ok(n),
            None => Err(value),
        })
    }

    /// Take a floating point field
    pub fn take_f64(&mut self, key: &str) -> Option<f64> {
        self.take_with(key, |value| match value.as_f64() {
            Some(n) => Ok(n),
            None => Err(value),
        })
    }

    /// Take an array whose elements are all strings
    pub fn take_string_list(&mut self, key: &str) -> Option<Vec<String>> {
        self.take_with(key, |value| match value {
            JsonValue::Array(items) if items.iter().all(JsonValue::is_string) => Ok(items
                .into_iter()
                .filter_map(|item| match item {
                    JsonValue::String(s) => Some(s),
                    _ => None,
                })
                .collect()),
            other => Err(other),
        })
    }

    /// Take an array whose elements are all numbers
    pub fn take_f64_list(&mut self, key: &str) -> Option<Vec<f64>> {
        self.take_with(key, |value| match value {
            JsonValue::Array(items) if items.iter().all(JsonValue::is_number) => {
                Ok(items.iter().filter_map(JsonValue::as_f64).collect())
            }
            other => Err(other),
        })
    }

    /// Take a nested object
    pub fn take_object(&mut self, key: &str) -> Option<JsonObject> {
        self.take_with(key, |value| match value {
            JsonValue::Object(object) => Ok(object),
            other => Err(other),
        })
    }

    /// Take a nested object as a typed entity
    pub fn take_entity<T: Entity>(&mut self, key: &str) -> Option<T> {
        self.take_object(key).map(T::from_object)
    }

    /// Take an array of records as typed entities, one per element
    pub fn take_entities<T: Entity>(&mut self, key: &str) -> Option<Vec<T>> {
        self.take_with(key, |value| match value {
            JsonValue::Array(items) => Ok(items.into_iter().map(T::from_value).collect()),
            other => Err(other),
        })
    }

    /// Everything that was not taken
    pub fn into_extra(self) -> JsonObject {
        self.fields
    }
}
