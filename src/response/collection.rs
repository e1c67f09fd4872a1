//! Result collection and the response entry point

use super::types::{ApiError, PageContents};
use crate::error::Result;
use crate::expansions::Expansions;
use crate::model::Tweet;
use crate::pagination::{
    CursorState, Direction, IssuedRequest, PageMeta, PaginationCursor, RequestContext,
};
use std::ops::Index;
use tracing::debug;

/// Entry point: parses a raw response body into a [`ResultCollection`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponsePayload;

impl ResponsePayload {
    /// Parse a response body
    ///
    /// `context` carries the fetcher and the original request so that the
    /// collection can page later. Without it, page transitions that need a
    /// fetch fail with `MissingFetcher`.
    pub fn parse(body: impl AsRef<[u8]>, context: Option<RequestContext>) -> Result<ResultCollection> {
        let contents = PageContents::decode(body.as_ref())?;
        debug!(
            tweets = contents.tweets.len(),
            has_meta = contents.meta.is_some(),
            errors = contents.errors.len(),
            "Parsed response"
        );
        Ok(ResultCollection::from_contents(contents, context))
    }
}

/// The current page of tweets plus what is needed to move between pages
///
/// The collection is long-lived: [`next_page`](Self::next_page) and
/// [`prev_page`](Self::prev_page) overwrite its tweets, meta and expansions
/// in place and hand back the same collection, so calls chain.
#[derive(Debug, Clone)]
pub struct ResultCollection {
    tweets: Vec<Tweet>,
    meta: Option<PageMeta>,
    expansions: Option<Expansions>,
    errors: Vec<ApiError>,
    cursor: PaginationCursor,
}

impl ResultCollection {
    /// Parse a response body; see [`ResponsePayload::parse`]
    pub fn parse(body: impl AsRef<[u8]>, context: Option<RequestContext>) -> Result<Self> {
        ResponsePayload::parse(body, context)
    }

    /// Wrap already decoded contents
    pub fn from_contents(contents: PageContents, context: Option<RequestContext>) -> Self {
        Self {
            tweets: contents.tweets,
            meta: contents.meta,
            expansions: contents.expansions,
            errors: contents.errors,
            cursor: PaginationCursor::new(context),
        }
    }

    // ------------------------------------------------------------------------
    // Sequence access
    // ------------------------------------------------------------------------

    pub fn tweets(&self) -> &[Tweet] {
        &self.tweets
    }

    pub fn len(&self) -> usize {
        self.tweets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tweet> {
        self.tweets.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Tweet> {
        self.tweets.get(index)
    }

    pub fn first(&self) -> Option<&Tweet> {
        self.tweets.first()
    }

    pub fn last(&self) -> Option<&Tweet> {
        self.tweets.last()
    }

    pub fn into_tweets(self) -> Vec<Tweet> {
        self.tweets
    }

    // ------------------------------------------------------------------------
    // Page sections
    // ------------------------------------------------------------------------

    /// Pagination metadata; `None` when the page had no `data`
    pub fn meta(&self) -> Option<&PageMeta> {
        self.meta.as_ref()
    }

    /// Expansion tables; `None` when the page had no `data`
    pub fn expansions(&self) -> Option<&Expansions> {
        self.expansions.as_ref()
    }

    /// Partial errors reported alongside the page
    pub fn errors(&self) -> &[ApiError] {
        &self.errors
    }

    // ------------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------------

    pub fn has_next_page(&self) -> bool {
        self.meta.as_ref().is_some_and(PageMeta::has_next)
    }

    pub fn has_prev_page(&self) -> bool {
        self.meta.as_ref().is_some_and(PageMeta::has_previous)
    }

    /// Replace the contents with the next page
    ///
    /// Without a next token this is a no-op that performs no fetch. On error
    /// the current contents are left as they were and the call can be retried.
    pub fn next_page(&mut self) -> Result<&mut Self> {
        self.page(Direction::Next)
    }

    /// Replace the contents with the previous page
    pub fn prev_page(&mut self) -> Result<&mut Self> {
        self.page(Direction::Previous)
    }

    /// Move one page in `direction`
    pub fn page(&mut self, direction: Direction) -> Result<&mut Self> {
        if let Some(contents) = self.cursor.advance(direction, self.meta.as_ref())? {
            self.replace(contents);
        }
        Ok(self)
    }

    pub fn state(&self) -> CursorState {
        self.cursor.state()
    }

    pub fn cursor(&self) -> &PaginationCursor {
        &self.cursor
    }

    pub fn last_request(&self) -> Option<&IssuedRequest> {
        self.cursor.last_request()
    }

    fn replace(&mut self, contents: PageContents) {
        self.tweets = contents.tweets;
        self.meta = contents.meta;
        self.expansions = contents.expansions;
        self.errors = contents.errors;
    }
}

impl<'a> IntoIterator for &'a ResultCollection {
    type Item = &'a Tweet;
    type IntoIter = std::slice::Iter<'a, Tweet>;

    fn into_iter(self) -> Self::IntoIter {
        self.tweets.iter()
    }
}

impl IntoIterator for ResultCollection {
    type Item = Tweet;
    type IntoIter = std::vec::IntoIter<Tweet>;

    fn into_iter(self) -> Self::IntoIter {
        self.tweets.into_iter()
    }
}

impl Index<usize> for ResultCollection {
    type Output = Tweet;

    fn index(&self, index: usize) -> &Tweet {
        &self.tweets[index]
    }
}
