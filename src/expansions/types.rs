//! Expansion categories and lookup keys

use crate::error::Error;
use crate::types::JsonValue;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Entity Keys
// ============================================================================

/// How identifiers of a category are normalized before indexing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPolicy {
    /// Digit-only identifiers collapse to integers; anything else stays opaque
    Numeric,
    /// Identifiers are compared as exact strings
    Opaque,
}

/// Normalized identifier used to index and query expansion tables
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKey {
    Numeric(u64),
    Opaque(String),
}

impl EntityKey {
    /// Normalize a raw identifier string
    pub fn normalize(raw: &str, policy: KeyPolicy) -> Self {
        if policy == KeyPolicy::Numeric
            && !raw.is_empty()
            && raw.bytes().all(|b| b.is_ascii_digit())
        {
            if let Ok(n) = raw.parse::<u64>() {
                return Self::Numeric(n);
            }
        }
        Self::Opaque(raw.to_string())
    }

    /// Normalize an identifier taken from a JSON record
    ///
    /// Accepts strings and non-negative integers; anything else has no key.
    pub fn from_value(value: &JsonValue, policy: KeyPolicy) -> Option<Self> {
        match value {
            JsonValue::String(s) => Some(Self::normalize(s, policy)),
            JsonValue::Number(n) => n
                .as_u64()
                .map(|n| Self::normalize(&n.to_string(), policy)),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Opaque(s) => f.write_str(s),
        }
    }
}

// ============================================================================
// Categories
// ============================================================================

/// The five side-loaded resource categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Media,
    Places,
    Polls,
    Tweets,
    Users,
}

impl Category {
    /// Every category, in `includes` key order
    pub const ALL: [Category; 5] = [
        Category::Media,
        Category::Places,
        Category::Polls,
        Category::Tweets,
        Category::Users,
    ];

    /// Key of this category inside the `includes` object
    pub fn name(self) -> &'static str {
        match self {
            Self::Media => "media",
            Self::Places => "places",
            Self::Polls => "polls",
            Self::Tweets => "tweets",
            Self::Users => "users",
        }
    }

    /// Field each element of this category is indexed by
    pub fn key_field(self) -> &'static str {
        match self {
            Self::Media => "media_key",
            Self::Places | Self::Polls | Self::Tweets | Self::Users => "id",
        }
    }

    /// Media keys ("3_1460323737035677698") and place ids ("01a9a39529b27f36")
    /// are opaque; the rest are numeric snowflake ids.
    pub fn key_policy(self) -> KeyPolicy {
        match self {
            Self::Media | Self::Places => KeyPolicy::Opaque,
            Self::Polls | Self::Tweets | Self::Users => KeyPolicy::Numeric,
        }
    }

    /// Normalize a raw identifier for this category
    pub fn key(self, raw: &str) -> EntityKey {
        EntityKey::normalize(raw, self.key_policy())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| Error::Other(format!("Unknown expansion category: {s}")))
    }
}
