//! Record mapping
//!
//! Turns the `data` section of a payload into typed entities.

use super::types::json_type_name;
use crate::model::Entity;
use crate::types::JsonValue;
use tracing::debug;

/// Maps primary records into typed entities
///
/// Singular endpoints return one object, list endpoints an array; both come
/// out as a sequence. Each record is mapped on its own, so a malformed one
/// yields a mostly-empty entity instead of aborting the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityMapper;

impl EntityMapper {
    /// Create a new mapper
    pub fn new() -> Self {
        Self
    }

    /// Map a `data` section; absent data maps to an empty sequence
    pub fn map<T: Entity>(&self, data: Option<JsonValue>) -> Vec<T> {
        map_records(data)
    }
}

/// Map a `data` section into entities, keeping server order
pub fn map_records<T: Entity>(data: Option<JsonValue>) -> Vec<T> {
    match data {
        None | Some(JsonValue::Null) => Vec::new(),
        Some(JsonValue::Array(items)) => items.into_iter().map(T::from_value).collect(),
        Some(JsonValue::Object(object)) => vec![T::from_object(object)],
        Some(other) => {
            debug!(
                kind = T::KIND,
                found = json_type_name(&other),
                "Primary data is neither an object nor an array"
            );
            vec![T::from_value(other)]
        }
    }
}
