//! Fetch collaborator abstraction
//!
//! The pagination engine never performs I/O itself; it asks a [`Fetcher`]
//! for the raw body of the next page.

use crate::error::{Error, Result};
use crate::types::StringMap;

/// Raw HTTP-level response handed back by a fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: u16,
    body: Vec<u8>,
}

impl RawResponse {
    /// Create a response with a status code and body
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Create a 200 response
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body as UTF-8 text
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(&self.body)
            .map_err(|e| Error::malformed(format!("Response body is not UTF-8: {e}")))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into [`Error::HttpStatus`]
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        let body = String::from_utf8_lossy(&self.body).into_owned();
        Err(Error::http_status(self.status, body))
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }
}

/// Blocking capability to GET a URL with query parameters
///
/// Implementations own transport, authentication and retries. Any error
/// they return is surfaced unchanged to the caller of the page request.
pub trait Fetcher: Send + Sync {
    fn get(&self, url: &str, params: &StringMap) -> Result<RawResponse>;
}

impl<F> Fetcher for F
where
    F: Fn(&str, &StringMap) -> Result<RawResponse> + Send + Sync,
{
    fn get(&self, url: &str, params: &StringMap) -> Result<RawResponse> {
        self(url, params)
    }
}
