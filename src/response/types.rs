//! Decoded page contents

use crate::decode::{map_records, RawPayload};
use crate::error::Result;
use crate::expansions::Expansions;
use crate::model::{Entity, FieldBag, Tweet};
use crate::pagination::PageMeta;
use crate::types::JsonObject;
use serde::Serialize;

/// Partial-failure error object from the top-level `errors` array
///
/// These describe individual records the server could not return; they never
/// fail the parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApiError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Entity for ApiError {
    const KIND: &'static str = "error";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            title: fields.take_string("title"),
            detail: fields.take_string("detail"),
            error_type: fields.take_string("type"),
            resource_type: fields.take_string("resource_type"),
            resource_id: fields.take_id("resource_id"),
            parameter: fields.take_string("parameter"),
            value: fields.take_id("value"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}

/// One fully decoded page
///
/// `meta` and `expansions` are `None` only when the payload had no `data`
/// section: there is nothing to resolve for zero entities, so they are not
/// computed at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContents {
    pub tweets: Vec<Tweet>,
    pub meta: Option<PageMeta>,
    pub expansions: Option<Expansions>,
    pub errors: Vec<ApiError>,
}

impl PageContents {
    /// Decode a response body into a page
    pub fn decode(body: &[u8]) -> Result<Self> {
        RawPayload::from_slice(body).map(Self::from_payload)
    }

    /// Map the sections of an already split payload
    ///
    /// Order is fixed: data, then meta, then includes.
    pub fn from_payload(payload: RawPayload) -> Self {
        let errors = map_records(payload.errors);

        let Some(data) = payload.data else {
            return Self {
                errors,
                ..Self::default()
            };
        };

        let tweets = map_records(Some(data));
        let meta = payload
            .meta
            .map(PageMeta::from_value)
            .unwrap_or_default();
        let expansions = Expansions::build(payload.includes);

        Self {
            tweets,
            meta: Some(meta),
            expansions: Some(expansions),
            errors,
        }
    }
}
