//! CLI commands and argument parsing

use crate::pagination::Direction;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Page through tweet search and lookup responses
#[derive(Parser, Debug)]
#[command(name = "tweetpage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Request a URL and walk its pages
    Fetch {
        /// Endpoint of the first page (overrides the config file)
        #[arg(long)]
        url: Option<String>,

        /// Query parameter as key=value (repeatable)
        #[arg(short, long = "query", value_parser = parse_key_value)]
        query: Vec<(String, String)>,

        /// Request header as key=value (repeatable)
        #[arg(short = 'H', long = "header", value_parser = parse_key_value)]
        header: Vec<(String, String)>,

        /// Bearer token (overrides the config file)
        #[arg(long)]
        bearer_token: Option<String>,

        /// Maximum number of pages to print, including the first
        #[arg(long, default_value = "1")]
        pages: usize,

        /// Direction to page in after the first page
        #[arg(long, default_value = "next", value_parser = parse_direction)]
        direction: Direction,
    },

    /// Decode a saved response body (stdin when no file is given)
    Parse {
        /// Response file (JSON)
        file: Option<PathBuf>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One tweet per line as JSON
    Json,
    /// Human-readable page summary with resolved expansions
    Summary,
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_direction(s: &str) -> std::result::Result<Direction, String> {
    s.parse().map_err(|e: crate::error::Error| e.to_string())
}
