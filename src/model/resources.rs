//! Expandable resources: users, media, polls, places

use super::view::{Entity, FieldBag};
use crate::types::JsonObject;
use serde::Serialize;

// ============================================================================
// User
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Handle without the leading `@`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned_tweet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_metrics: Option<UserPublicMetrics>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Entity for User {
    const KIND: &'static str = "user";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            id: fields.take_id("id"),
            name: fields.take_string("name"),
            username: fields.take_string("username"),
            created_at: fields.take_string("created_at"),
            description: fields.take_string("description"),
            location: fields.take_string("location"),
            pinned_tweet_id: fields.take_id("pinned_tweet_id"),
            profile_image_url: fields.take_string("profile_image_url"),
            protected: fields.take_bool("protected"),
            url: fields.take_string("url"),
            verified: fields.take_bool("verified"),
            public_metrics: fields.take_entity("public_metrics"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserPublicMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweet_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listed_count: Option<u64>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Entity for UserPublicMetrics {
    const KIND: &'static str = "user_public_metrics";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            followers_count: fields.take_u64("followers_count"),
            following_count: fields.take_u64("following_count"),
            tweet_count: fields.take_u64("tweet_count"),
            listed_count: fields.take_u64("listed_count"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}

// ============================================================================
// Media
// ============================================================================

/// Photo, video or animated GIF, keyed by `media_key`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediaObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_key: Option<String>,
    /// "photo", "video" or "animated_gif"
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Entity for MediaObject {
    const KIND: &'static str = "media";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            media_key: fields.take_id("media_key"),
            media_type: fields.take_string("type"),
            url: fields.take_string("url"),
            preview_image_url: fields.take_string("preview_image_url"),
            duration_ms: fields.take_u64("duration_ms"),
            height: fields.take_u64("height"),
            width: fields.take_u64("width"),
            alt_text: fields.take_string("alt_text"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}

// ============================================================================
// Poll
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Poll {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Options in server order (empty when the poll carried none)
    pub options: Vec<PollOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voting_status: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Poll {
    /// Sum of all option votes that were reported
    pub fn total_votes(&self) -> u64 {
        self.options.iter().filter_map(|option| option.votes).sum()
    }
}

impl Entity for Poll {
    const KIND: &'static str = "poll";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            id: fields.take_id("id"),
            options: fields.take_entities("options").unwrap_or_default(),
            duration_minutes: fields.take_u64("duration_minutes"),
            end_datetime: fields.take_string("end_datetime"),
            voting_status: fields.take_string("voting_status"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PollOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<u64>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Entity for PollOption {
    const KIND: &'static str = "poll_option";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            position: fields.take_u64("position"),
            label: fields.take_string("label"),
            votes: fields.take_u64("votes"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}

// ============================================================================
// Place
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Place {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contained_within: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoJson>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Entity for Place {
    const KIND: &'static str = "place";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            id: fields.take_id("id"),
            full_name: fields.take_string("full_name"),
            name: fields.take_string("name"),
            country: fields.take_string("country"),
            country_code: fields.take_string("country_code"),
            place_type: fields.take_string("place_type"),
            contained_within: fields.take_string_list("contained_within"),
            geo: fields.take_entity("geo"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}

// ============================================================================
// GeoJSON
// ============================================================================

/// GeoJSON fragment (a `Point` on tweets, a `Feature` with `bbox` on places)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeoJson {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub geo_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl GeoJson {
    /// `(longitude, latitude)` of a point
    pub fn point(&self) -> Option<(f64, f64)> {
        match self.coordinates.as_deref() {
            Some([lon, lat]) => Some((*lon, *lat)),
            _ => None,
        }
    }
}

impl Entity for GeoJson {
    const KIND: &'static str = "geojson";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            geo_type: fields.take_string("type"),
            coordinates: fields.take_f64_list("coordinates"),
            bbox: fields.take_f64_list("bbox"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}
