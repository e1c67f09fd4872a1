// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # tweetpage
//!
//! Typed views, expansion lookup and in-place pagination over tweet API
//! responses.
//!
//! ## Features
//!
//! - **Lenient decoding**: Unknown fields are kept, wrong-typed fields read as absent
//! - **Expansions**: Media, places, polls, tweets and users indexed by normalized key
//! - **Pagination**: `next_page`/`prev_page` swap the page in place using the meta tokens
//! - **HTTP fetcher**: Blocking reqwest client with retries and backoff
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tweetpage::{ClientConfig, ResponsePayload};
//!
//! let config = ClientConfig::from_file("search.yaml")?;
//! let fetcher = Arc::new(config.build_fetcher()?);
//! let context = config.request_context(fetcher.clone())?;
//!
//! let first = fetcher.send(&context.url, &context.query)?.error_for_status()?;
//! let mut page = ResponsePayload::parse(first.bytes(), Some(context))?;
//!
//! while page.has_next_page() {
//!     for tweet in &page {
//!         let author = page.expansions().and_then(|e| e.author_of(tweet));
//!         println!("{:?} {:?}", author.and_then(|u| u.username.as_deref()), tweet.text);
//!     }
//!     page.next_page()?;
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! body ──► decode::RawPayload ──► response::PageContents ──► ResultCollection
//!              │                      │        │                   │
//!              │               model::Tweet  expansions::Expansions│
//!              │                                                   ▼
//!              └──────────── pagination::PaginationCursor ◄── next_page()
//!                                      │
//!                               Fetcher (http::HttpFetcher, closures)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Typed entity views
pub mod model;

/// Payload splitting and record mapping
pub mod decode;

/// Expansion tables
pub mod expansions;

/// Pagination cursor and the fetch collaborator
pub mod pagination;

/// Response entry point and result collection
pub mod response;

/// Blocking HTTP fetcher with retry and backoff
pub mod http;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::ClientConfig;
pub use expansions::{Category, EntityKey, Expansions};
pub use http::{HttpFetcher, HttpFetcherConfig};
pub use model::{Entity, MediaObject, Place, Poll, Tweet, User};
pub use pagination::{CursorState, Direction, Fetcher, PageMeta, RawResponse, RequestContext};
pub use response::{ApiError, ResponsePayload, ResultCollection};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
