//! Pagination module
//!
//! # Overview
//!
//! Responses carry opaque `next_token`/`previous_token` values in their
//! `meta` block. A [`PaginationCursor`] forwards those tokens as query
//! parameters through a [`Fetcher`] and decodes the returned page, which the
//! owning collection then swaps in place.
//!
//! Page transitions take `&mut self` and block on the fetcher. Sharing one
//! collection across threads requires the caller's own synchronization.

mod cursor;
mod fetcher;
mod types;

pub use cursor::PaginationCursor;
pub use fetcher::{Fetcher, RawResponse};
pub use types::{
    CursorState, Direction, IssuedRequest, PageMeta, PaginationConfig, RequestContext,
};

#[cfg(test)]
mod tests;
