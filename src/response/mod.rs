//! Response module
//!
//! Entry point of the crate: [`ResponsePayload::parse`] decodes a body into
//! a [`ResultCollection`] of tweets with its page metadata, expansion tables
//! and the request context needed to page further.

mod collection;
mod types;

pub use collection::{ResponsePayload, ResultCollection};
pub use types::{ApiError, PageContents};
