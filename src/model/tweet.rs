//! Tweet entity and its owned sub-structures

use super::resources::GeoJson;
use super::view::{Entity, FieldBag};
use crate::types::JsonObject;
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Tweet
// ============================================================================

/// A tweet, either a primary record or an expanded one
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tweet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    /// Creation time as sent by the server (ISO 8601)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possibly_sensitive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_settings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withheld: Option<Withheld>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_metrics: Option<TweetPublicMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_tweets: Option<Vec<ReferencedTweet>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_history_tweet_ids: Option<Vec<String>>,
    #[serde(flatten)]
    pub annotations: Annotations,
    #[serde(skip_serializing_if = "Attachments::is_empty")]
    pub attachments: Attachments,
    #[serde(skip_serializing_if = "Geo::is_empty")]
    pub geo: Geo,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Tweet {
    /// User this tweet replies to (alias of `in_reply_to_user_id`)
    pub fn reply_target(&self) -> Option<&str> {
        self.in_reply_to_user_id.as_deref()
    }

    /// Sensitivity flag (alias of `possibly_sensitive`)
    pub fn is_sensitive(&self) -> Option<bool> {
        self.possibly_sensitive
    }

    /// Who may reply (alias of `reply_settings`)
    pub fn permission(&self) -> Option<&str> {
        self.reply_settings.as_deref()
    }

    /// Posting client (alias of `source`)
    pub fn device(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Parsed creation time; `None` when absent or not RFC 3339
    pub fn created_time(&self) -> Option<DateTime<Utc>> {
        self.created_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Media keys referenced by this tweet (empty when none)
    pub fn media_keys(&self) -> &[String] {
        self.attachments.media_keys.as_deref().unwrap_or_default()
    }

    /// Poll ids referenced by this tweet (empty when none)
    pub fn poll_ids(&self) -> &[String] {
        self.attachments.poll_ids.as_deref().unwrap_or_default()
    }
}

impl Entity for Tweet {
    const KIND: &'static str = "tweet";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            id: fields.take_id("id"),
            text: fields.take_string("text"),
            author_id: fields.take_id("author_id"),
            created_at: fields.take_string("created_at"),
            conversation_id: fields.take_id("conversation_id"),
            in_reply_to_user_id: fields.take_id("in_reply_to_user_id"),
            possibly_sensitive: fields.take_bool("possibly_sensitive"),
            reply_settings: fields.take_string("reply_settings"),
            source: fields.take_string("source"),
            lang: fields.take_string("lang"),
            withheld: fields.take_entity("withheld"),
            public_metrics: fields.take_entity("public_metrics"),
            referenced_tweets: fields.take_entities("referenced_tweets"),
            edit_history_tweet_ids: fields.take_string_list("edit_history_tweet_ids"),
            annotations: Annotations {
                context: fields.take_entities("context_annotations"),
                entities: fields.take_entity("entities"),
            },
            attachments: fields.take_entity("attachments").unwrap_or_default(),
            geo: fields.take_entity("geo").unwrap_or_default(),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}

// ============================================================================
// Small Tweet Views
// ============================================================================

/// Withholding information
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Withheld {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_codes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Entity for Withheld {
    const KIND: &'static str = "withheld";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            copyright: fields.take_bool("copyright"),
            country_codes: fields.take_string_list("country_codes"),
            scope: fields.take_string("scope"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}

/// Engagement counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TweetPublicMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retweet_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impression_count: Option<u64>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Entity for TweetPublicMetrics {
    const KIND: &'static str = "tweet_public_metrics";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            retweet_count: fields.take_u64("retweet_count"),
            reply_count: fields.take_u64("reply_count"),
            like_count: fields.take_u64("like_count"),
            quote_count: fields.take_u64("quote_count"),
            bookmark_count: fields.take_u64("bookmark_count"),
            impression_count: fields.take_u64("impression_count"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}

/// Reference to another tweet ("retweeted", "quoted", "replied_to")
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferencedTweet {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Entity for ReferencedTweet {
    const KIND: &'static str = "referenced_tweet";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            ref_type: fields.take_string("type"),
            id: fields.take_id("id"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}

// ============================================================================
// Attachments
// ============================================================================

/// Raw references to media and polls; resolve them through `Expansions`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attachments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_ids: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Attachments {
    /// True when nothing at all was attached
    pub fn is_empty(&self) -> bool {
        self.media_keys.is_none() && self.poll_ids.is_none() && self.extra.is_empty()
    }
}

impl Entity for Attachments {
    const KIND: &'static str = "attachments";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            media_keys: fields.take_string_list("media_keys"),
            poll_ids: fields.take_string_list("poll_ids"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}

// ============================================================================
// Geo
// ============================================================================

/// Geographic metadata attached to a tweet
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Geo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoJson>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Geo {
    pub fn is_empty(&self) -> bool {
        self.place_id.is_none() && self.coordinates.is_none() && self.extra.is_empty()
    }
}

impl Entity for Geo {
    const KIND: &'static str = "geo";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            place_id: fields.take_id("place_id"),
            coordinates: fields.take_entity("coordinates"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}

// ============================================================================
// Annotations
// ============================================================================

/// Context annotations and text entities of a tweet
///
/// Built from two top-level tweet keys, `context_annotations` and `entities`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Annotations {
    #[serde(rename = "context_annotations", skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<ContextAnnotation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<TweetEntities>,
}

impl Annotations {
    /// `(domain name, entity name)` pairs, in server order
    pub fn context_pairs(&self) -> Vec<(Option<&str>, Option<&str>)> {
        self.context
            .iter()
            .flatten()
            .map(|annotation| {
                (
                    annotation.domain.as_ref().and_then(|d| d.name.as_deref()),
                    annotation.entity.as_ref().and_then(|e| e.name.as_deref()),
                )
            })
            .collect()
    }

    pub fn hashtags(&self) -> &[Tag] {
        self.entities
            .as_ref()
            .and_then(|e| e.hashtags.as_deref())
            .unwrap_or_default()
    }

    pub fn cashtags(&self) -> &[Tag] {
        self.entities
            .as_ref()
            .and_then(|e| e.cashtags.as_deref())
            .unwrap_or_default()
    }

    pub fn mentions(&self) -> &[Mention] {
        self.entities
            .as_ref()
            .and_then(|e| e.mentions.as_deref())
            .unwrap_or_default()
    }

    pub fn urls(&self) -> &[UrlEntity] {
        self.entities
            .as_ref()
            .and_then(|e| e.urls.as_deref())
            .unwrap_or_default()
    }

    pub fn text_annotations(&self) -> &[TextAnnotation] {
        self.entities
            .as_ref()
            .and_then(|e| e.annotations.as_deref())
            .unwrap_or_default()
    }
}

/// One (domain, entity) context pair
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContextAnnotation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<ContextEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<ContextEntity>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Entity for ContextAnnotation {
    const KIND: &'static str = "context_annotation";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            domain: fields.take_entity("domain"),
            entity: fields.take_entity("entity"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}

/// Either side of a context annotation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContextEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Entity for ContextEntity {
    const KIND: &'static str = "context_entity";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            id: fields.take_id("id"),
            name: fields.take_string("name"),
            description: fields.take_string("description"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}

/// Entity bundle parsed out of the tweet text
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TweetEntities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<TextAnnotation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cashtags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentions: Option<Vec<Mention>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<UrlEntity>>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Entity for TweetEntities {
    const KIND: &'static str = "entities";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            annotations: fields.take_entities("annotations"),
            cashtags: fields.take_entities("cashtags"),
            hashtags: fields.take_entities("hashtags"),
            mentions: fields.take_entities("mentions"),
            urls: fields.take_entities("urls"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}

/// Named-entity annotation (person, place, product, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextAnnotation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub annotation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_text: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl TextAnnotation {
    pub fn text(&self) -> Option<&str> {
        self.normalized_text.as_deref()
    }
}

impl Entity for TextAnnotation {
    const KIND: &'static str = "annotation";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            start: fields.take_u64("start"),
            end: fields.take_u64("end"),
            probability: fields.take_f64("probability"),
            annotation_type: fields.take_string("type"),
            normalized_text: fields.take_string("normalized_text"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}

/// Hashtag or cashtag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Tag {
    pub fn text(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

impl Entity for Tag {
    const KIND: &'static str = "tag";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            start: fields.take_u64("start"),
            end: fields.take_u64("end"),
            tag: fields.take_string("tag"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}

/// `@username` mention
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Mention {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Mention {
    pub fn text(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

impl Entity for Mention {
    const KIND: &'static str = "mention";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            start: fields.take_u64("start"),
            end: fields.take_u64("end"),
            username: fields.take_string("username"),
            id: fields.take_id("id"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}

/// Link found in the tweet text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UrlEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unwound_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_key: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl UrlEntity {
    /// Expanded URL, falling back to the short one
    pub fn text(&self) -> Option<&str> {
        self.expanded_url.as_deref().or(self.url.as_deref())
    }
}

impl Entity for UrlEntity {
    const KIND: &'static str = "url";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            start: fields.take_u64("start"),
            end: fields.take_u64("end"),
            url: fields.take_string("url"),
            expanded_url: fields.take_string("expanded_url"),
            display_url: fields.take_string("display_url"),
            unwound_url: fields.take_string("unwound_url"),
            status: fields.take_u64("status"),
            title: fields.take_string("title"),
            description: fields.take_string("description"),
            media_key: fields.take_string("media_key"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}
