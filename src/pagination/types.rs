//! Pagination types
//!
//! Defines page metadata, the cursor state machine states, and the request
//! context a collection needs to fetch further pages.

use super::fetcher::Fetcher;
use crate::error::{Error, Result};
use crate::model::{Entity, FieldBag};
use crate::types::{JsonObject, StringMap};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

// ============================================================================
// Direction
// ============================================================================

/// Which way to page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Next => Self::Previous,
            Self::Previous => Self::Next,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "next" | "forward" => Ok(Self::Next),
            "previous" | "prev" | "backward" => Ok(Self::Previous),
            other => Err(Error::config(format!("Unknown page direction: {other}"))),
        }
    }
}

// ============================================================================
// Page Metadata
// ============================================================================

/// Typed view over the `meta` block
///
/// Tokens are opaque: they are copied into the next request and never
/// inspected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest_id: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl PageMeta {
    /// Continuation token for the given direction
    pub fn token(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::Next => self.next_token.as_deref(),
            Direction::Previous => self.previous_token.as_deref(),
        }
    }

    pub fn has_next(&self) -> bool {
        self.next_token.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous_token.is_some()
    }
}

impl Entity for PageMeta {
    const KIND: &'static str = "meta";

    fn from_fields(mut fields: FieldBag) -> Self {
        Self {
            next_token: fields.take_string("next_token"),
            previous_token: fields.take_string("previous_token"),
            result_count: fields.take_u64("result_count"),
            newest_id: fields.take_id("newest_id"),
            oldest_id: fields.take_id("oldest_id"),
            extra: fields.into_extra(),
        }
    }

    fn extra(&self) -> &JsonObject {
        &self.extra
    }
}

// ============================================================================
// Cursor State
// ============================================================================

/// State of a pagination cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorState {
    /// Idle, holding the last fetched page
    #[default]
    Ready,
    /// A request is outstanding
    Fetching,
    /// The last request found no token in the requested direction
    Exhausted(Direction),
    /// The last attempt failed; behaves like `Ready`
    Failed,
}

impl CursorState {
    /// Whether a new page request may be issued
    pub fn can_fetch(&self) -> bool {
        !matches!(self, Self::Fetching)
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Query parameter names the continuation tokens are sent under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Parameter carrying the forward token
    #[serde(default = "default_next_param")]
    pub next_param: String,
    /// Parameter carrying the backward token
    #[serde(default = "default_previous_param")]
    pub previous_param: String,
}

fn default_next_param() -> String {
    "next_token".to_string()
}

fn default_previous_param() -> String {
    "previous".to_string()
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            next_param: default_next_param(),
            previous_param: default_previous_param(),
        }
    }
}

impl PaginationConfig {
    /// Create a config with custom parameter names
    pub fn new(next_param: impl Into<String>, previous_param: impl Into<String>) -> Self {
        Self {
            next_param: next_param.into(),
            previous_param: previous_param.into(),
        }
    }

    /// Parameter name for a direction
    pub fn param(&self, direction: Direction) -> &str {
        match direction {
            Direction::Next => &self.next_param,
            Direction::Previous => &self.previous_param,
        }
    }

    /// Whether `name` carries a continuation token in either direction
    pub fn is_token_param(&self, name: &str) -> bool {
        name == self.next_param || name == self.previous_param
    }
}

// ============================================================================
// Request Context
// ============================================================================

/// Everything needed to request another page of the same query
#[derive(Clone)]
pub struct RequestContext {
    /// Fetch collaborator
    pub fetcher: Arc<dyn Fetcher>,
    /// URL of the original request
    pub url: String,
    /// Query parameters of the original request
    pub query: StringMap,
    /// Token parameter names
    pub pagination: PaginationConfig,
}

impl RequestContext {
    /// Create a context for a URL with no query parameters
    pub fn new(fetcher: Arc<dyn Fetcher>, url: impl Into<String>) -> Self {
        Self {
            fetcher,
            url: url.into(),
            query: StringMap::new(),
            pagination: PaginationConfig::default(),
        }
    }

    /// Add a query parameter of the original request
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Replace the original query parameters
    #[must_use]
    pub fn with_query(mut self, query: StringMap) -> Self {
        self.query = query;
        self
    }

    /// Set token parameter names
    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("url", &self.url)
            .field("query", &self.query)
            .field("pagination", &self.pagination)
            .finish_non_exhaustive()
    }
}

/// A page request that was handed to the fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedRequest {
    pub direction: Direction,
    pub url: String,
    pub params: StringMap,
}
