//! Entity model
//!
//! Typed views over the tweet/user/media/poll/place family of records.
//!
//! # Overview
//!
//! Each resource is a plain struct whose known fields are `Option`s and whose
//! unknown fields live in an `extra` map reachable through [`Entity::raw`].
//! Mapping never fails: a record with the wrong shape simply yields absent
//! accessors, so a single bad record cannot void a page.

mod resources;
mod tweet;
mod view;

pub use resources::{GeoJson, MediaObject, Place, Poll, PollOption, User, UserPublicMetrics};
pub use tweet::{
    Annotations, Attachments, ContextAnnotation, ContextEntity, Geo, Mention, ReferencedTweet,
    Tag, TextAnnotation, Tweet, TweetEntities, TweetPublicMetrics, UrlEntity, Withheld,
};
pub use view::{Entity, FieldBag};
