//! CLI module
//!
//! Command-line interface for fetching and decoding paginated responses.
//!
//! # Commands
//!
//! - `fetch` - Request a URL and walk its pages
//! - `parse` - Decode a saved response body

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
