//! Pagination cursor
//!
//! Tracks request bookkeeping between pages and drives the fetch for a page
//! transition. The collection that owns the cursor swaps in the decoded page.

use super::fetcher::RawResponse;
use super::types::{CursorState, Direction, IssuedRequest, PageMeta, RequestContext};
use crate::error::{Error, Result};
use crate::response::PageContents;
use crate::types::StringMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Request state for walking a paginated result set
///
/// Both directions share one URL and one base query. A request carries only
/// the token of its own direction: setting the forward token clears the
/// backward one from the overrides and vice versa.
#[derive(Debug, Clone, Default)]
pub struct PaginationCursor {
    context: Option<RequestContext>,
    overrides: StringMap,
    state: CursorState,
    last_request: Option<IssuedRequest>,
}

impl PaginationCursor {
    /// Create a cursor; without a context only no-op transitions are possible
    pub fn new(context: Option<RequestContext>) -> Self {
        Self {
            context,
            ..Default::default()
        }
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn context(&self) -> Option<&RequestContext> {
        self.context.as_ref()
    }

    /// Pending query parameter overrides (the current token)
    pub fn overrides(&self) -> &StringMap {
        &self.overrides
    }

    /// The most recent request handed to the fetcher
    pub fn last_request(&self) -> Option<&IssuedRequest> {
        self.last_request.as_ref()
    }

    /// Parameters the next request would be sent with
    ///
    /// Token parameters in the base query are dropped unless an override
    /// replaces them, so a request carries only its own direction's token.
    pub fn request_params(&self) -> StringMap {
        let mut params = StringMap::new();
        if let Some(context) = &self.context {
            let pagination = &context.pagination;
            params.extend(
                context
                    .query
                    .iter()
                    .filter(|(key, _)| {
                        !pagination.is_token_param(key) || self.overrides.contains_key(*key)
                    })
                    .map(|(key, value)| (key.clone(), value.clone())),
            );
        }
        params.extend(
            self.overrides
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        params
    }

    /// Fetch and decode the page in `direction`
    ///
    /// Returns `Ok(None)` without fetching when `meta` has no token for that
    /// direction. On error nothing but the cursor's own bookkeeping changes.
    pub fn advance(
        &mut self,
        direction: Direction,
        meta: Option<&PageMeta>,
    ) -> Result<Option<PageContents>> {
        let Some(token) = meta.and_then(|meta| meta.token(direction)) else {
            debug!(%direction, "No continuation token, page unchanged");
            self.state = CursorState::Exhausted(direction);
            return Ok(None);
        };

        let Some(context) = self.context.as_ref() else {
            self.state = CursorState::Failed;
            return Err(Error::MissingFetcher {
                direction: direction.to_string(),
            });
        };
        let fetcher = Arc::clone(&context.fetcher);
        let url = context.url.clone();
        let token_param = context.pagination.param(direction).to_string();
        let other_param = context.pagination.param(direction.opposite()).to_string();

        if other_param != token_param {
            self.overrides.remove(&other_param);
        }
        self.overrides.insert(token_param, token.to_string());
        let params = self.request_params();

        debug!(%direction, url = %url, "Requesting page");
        self.state = CursorState::Fetching;
        let result = fetcher
            .get(&url, &params)
            .and_then(RawResponse::error_for_status)
            .and_then(|response| PageContents::decode(response.bytes()));

        self.last_request = Some(IssuedRequest {
            direction,
            url,
            params,
        });

        match result {
            Ok(contents) => {
                debug!(%direction, tweets = contents.tweets.len(), "Page fetched");
                self.state = CursorState::Ready;
                Ok(Some(contents))
            }
            Err(e) => {
                warn!(%direction, error = %e, "Page request failed");
                self.state = CursorState::Failed;
                Err(e)
            }
        }
    }
}
