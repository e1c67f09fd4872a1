//! Expansion tables and reference resolution

use super::types::{Category, EntityKey};
use crate::model::{Entity, MediaObject, Place, Poll, ReferencedTweet, Tweet, User};
use crate::types::JsonValue;
use std::collections::HashMap;
use tracing::debug;

// ============================================================================
// Table
// ============================================================================

/// Identifier-indexed lookup table for one category
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T> {
    category: Category,
    entries: HashMap<EntityKey, T>,
}

impl<T: Entity> Table<T> {
    /// Create an empty table
    pub fn new(category: Category) -> Self {
        Self {
            category,
            entries: HashMap::new(),
        }
    }

    /// Index the elements of one `includes` category
    ///
    /// Elements without a usable key field are skipped. When two elements
    /// share a key the later one wins.
    pub fn build(category: Category, items: Option<JsonValue>) -> Self {
        let mut table = Self::new(category);

        let items = match items {
            None | Some(JsonValue::Null) => return table,
            Some(JsonValue::Array(items)) => items,
            Some(other) => {
                debug!(category = %category, value = %other, "Expansion category is not an array");
                return table;
            }
        };

        let key_field = category.key_field();
        let policy = category.key_policy();

        for item in items {
            let Some(key) = item
                .get(key_field)
                .and_then(|value| EntityKey::from_value(value, policy))
            else {
                debug!(category = %category, field = key_field, "Skipping expansion without a key");
                continue;
            };

            if table.entries.insert(key.clone(), T::from_value(item)).is_some() {
                debug!(category = %category, key = %key, "Duplicate expansion key, keeping the last");
            }
        }

        table
    }

    /// Exact-match lookup of a raw identifier
    pub fn find(&self, raw: &str) -> Option<&T> {
        self.entries.get(&self.category.key(raw))
    }

    /// Lookup by an already-normalized key
    pub fn get(&self, key: &EntityKey) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityKey, &T)> {
        self.entries.iter()
    }
}

// ============================================================================
// Expansions
// ============================================================================

/// A resolved expansion of any category
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expanded<'a> {
    Media(&'a MediaObject),
    Place(&'a Place),
    Poll(&'a Poll),
    Tweet(&'a Tweet),
    User(&'a User),
}

/// Lookup tables built from the `includes` section
///
/// Every table exists even when its category was absent, so lookups never
/// need a presence check; a missing target is simply `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Expansions {
    pub media: Table<MediaObject>,
    pub places: Table<Place>,
    pub polls: Table<Poll>,
    pub tweets: Table<Tweet>,
    pub users: Table<User>,
}

impl Default for Expansions {
    fn default() -> Self {
        Self {
            media: Table::new(Category::Media),
            places: Table::new(Category::Places),
            polls: Table::new(Category::Polls),
            tweets: Table::new(Category::Tweets),
            users: Table::new(Category::Users),
        }
    }
}

impl Expansions {
    /// Build all tables from an `includes` section
    ///
    /// A missing or non-object section yields empty tables. Unknown category
    /// names are ignored.
    pub fn build(includes: Option<JsonValue>) -> Self {
        let mut includes = match includes {
            None | Some(JsonValue::Null) => return Self::default(),
            Some(JsonValue::Object(object)) => object,
            Some(other) => {
                debug!(value = %other, "Includes section is not an object");
                return Self::default();
            }
        };

        let mut take = |category: Category| includes.remove(category.name());
        let expansions = Self {
            media: Table::build(Category::Media, take(Category::Media)),
            places: Table::build(Category::Places, take(Category::Places)),
            polls: Table::build(Category::Polls, take(Category::Polls)),
            tweets: Table::build(Category::Tweets, take(Category::Tweets)),
            users: Table::build(Category::Users, take(Category::Users)),
        };

        debug!(
            media = expansions.media.len(),
            places = expansions.places.len(),
            polls = expansions.polls.len(),
            tweets = expansions.tweets.len(),
            users = expansions.users.len(),
            "Built expansion tables"
        );

        expansions
    }

    /// Look up an identifier in one category
    pub fn find(&self, category: Category, key: &str) -> Option<Expanded<'_>> {
        match category {
            Category::Media => self.media.find(key).map(Expanded::Media),
            Category::Places => self.places.find(key).map(Expanded::Place),
            Category::Polls => self.polls.find(key).map(Expanded::Poll),
            Category::Tweets => self.tweets.find(key).map(Expanded::Tweet),
            Category::Users => self.users.find(key).map(Expanded::User),
        }
    }

    pub fn media(&self, media_key: &str) -> Option<&MediaObject> {
        self.media.find(media_key)
    }

    pub fn place(&self, id: &str) -> Option<&Place> {
        self.places.find(id)
    }

    pub fn poll(&self, id: &str) -> Option<&Poll> {
        self.polls.find(id)
    }

    pub fn tweet(&self, id: &str) -> Option<&Tweet> {
        self.tweets.find(id)
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.find(id)
    }

    /// Total number of indexed entities
    pub fn len(&self) -> usize {
        self.media.len() + self.places.len() + self.polls.len() + self.tweets.len() + self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ------------------------------------------------------------------------
    // Reference resolution
    // ------------------------------------------------------------------------

    /// Author of a tweet
    pub fn author_of(&self, tweet: &Tweet) -> Option<&User> {
        tweet.author_id.as_deref().and_then(|id| self.user(id))
    }

    /// Attached media, one entry per media key in attachment order
    pub fn media_of<'a>(&'a self, tweet: &'a Tweet) -> Vec<(&'a str, Option<&'a MediaObject>)> {
        tweet
            .media_keys()
            .iter()
            .map(|key| (key.as_str(), self.media(key)))
            .collect()
    }

    /// Attached polls, one entry per poll id in attachment order
    pub fn polls_of<'a>(&'a self, tweet: &'a Tweet) -> Vec<(&'a str, Option<&'a Poll>)> {
        tweet
            .poll_ids()
            .iter()
            .map(|id| (id.as_str(), self.poll(id)))
            .collect()
    }

    /// Place a tweet was tagged with
    pub fn place_of(&self, tweet: &Tweet) -> Option<&Place> {
        tweet.geo.place_id.as_deref().and_then(|id| self.place(id))
    }

    /// Retweeted, quoted and replied-to tweets
    pub fn referenced_tweets_of<'a>(
        &'a self,
        tweet: &'a Tweet,
    ) -> Vec<(&'a ReferencedTweet, Option<&'a Tweet>)> {
        tweet
            .referenced_tweets
            .iter()
            .flatten()
            .map(|reference| {
                let target = reference.id.as_deref().and_then(|id| self.tweet(id));
                (reference, target)
            })
            .collect()
    }
}
