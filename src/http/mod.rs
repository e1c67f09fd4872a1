//! HTTP fetcher module
//!
//! A blocking [`Fetcher`](crate::pagination::Fetcher) over reqwest with
//! retries and constant, linear or exponential backoff.

mod client;

pub use client::{HttpFetcher, HttpFetcherConfig, HttpFetcherConfigBuilder};
