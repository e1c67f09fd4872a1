//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::error::{Error, Result, ResultExt};
use crate::pagination::{Direction, Fetcher, RawResponse};
use crate::response::{ResponsePayload, ResultCollection};
use crate::types::LogLevel;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
    config: ClientConfig,
    fetcher: Option<Arc<dyn Fetcher>>,
}

impl Runner {
    /// Create a runner, loading the config file when one is given
    pub fn new(cli: Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        Ok(Self {
            cli,
            config,
            fetcher: None,
        })
    }

    /// Use `fetcher` instead of building an HTTP fetcher from the config
    #[must_use]
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Level the binary should log at
    pub fn log_level(&self) -> LogLevel {
        if self.cli.verbose {
            LogLevel::Debug
        } else {
            self.config.log_level
        }
    }

    /// Run the CLI command, printing to stdout
    pub fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_with_output(&mut out)
    }

    /// Run the CLI command, printing to `out`
    pub fn run_with_output(&self, out: &mut impl Write) -> Result<()> {
        match &self.cli.command {
            Commands::Fetch {
                url,
                query,
                header,
                bearer_token,
                pages,
                direction,
            } => {
                let mut config = self.config.clone();
                if let Some(url) = url {
                    config.url = Some(url.clone());
                }
                config.query.extend(query.iter().cloned());
                config.http.headers.extend(header.iter().cloned());
                if let Some(token) = bearer_token {
                    config.bearer_token = Some(token.clone());
                }
                config.validate()?;
                self.fetch(&config, *pages, *direction, out)
            }
            Commands::Parse { file } => self.parse(file.as_ref(), out),
        }
    }

    /// Request the first page and walk up to `pages - 1` more
    fn fetch(
        &self,
        config: &ClientConfig,
        pages: usize,
        direction: Direction,
        out: &mut impl Write,
    ) -> Result<()> {
        let fetcher: Arc<dyn Fetcher> = match &self.fetcher {
            Some(fetcher) => Arc::clone(fetcher),
            None => Arc::new(config.build_fetcher()?),
        };
        let context = config.request_context(Arc::clone(&fetcher))?;

        info!(url = %context.url, pages, %direction, "Fetching");
        let response = fetcher
            .get(&context.url, &context.query)
            .and_then(RawResponse::error_for_status)
            .inspect_err(|e| error!(error = %e, "First page request failed"))?;
        let mut collection = ResponsePayload::parse(response.bytes(), Some(context))?;

        self.emit(&collection, 1, out)?;
        for page in 2..=pages {
            let has_more = match direction {
                Direction::Next => collection.has_next_page(),
                Direction::Previous => collection.has_prev_page(),
            };
            if !has_more {
                info!(page, "No more pages");
                break;
            }
            collection.page(direction)?;
            self.emit(&collection, page, out)?;
        }
        Ok(())
    }

    /// Decode a saved response body
    fn parse(&self, file: Option<&PathBuf>, out: &mut impl Write) -> Result<()> {
        let body = match file {
            Some(path) => std::fs::read(path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::FileNotFound {
                        path: path.display().to_string(),
                    }
                } else {
                    Error::Io(e)
                }
            })?,
            None => {
                let mut buf = Vec::new();
                std::io::stdin().read_to_end(&mut buf)?;
                buf
            }
        };
        let collection = ResponsePayload::parse(body, None)?;
        self.emit(&collection, 1, out)
    }

    fn emit(&self, collection: &ResultCollection, page: usize, out: &mut impl Write) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => write_json(collection, out),
            OutputFormat::Summary => write_summary(collection, page, out),
        }
    }
}

/// One tweet per line
fn write_json(collection: &ResultCollection, out: &mut impl Write) -> Result<()> {
    for tweet in collection {
        serde_json::to_writer(&mut *out, tweet).with_context(|| {
            format!("Failed to write tweet {}", tweet.id.as_deref().unwrap_or("?"))
        })?;
        writeln!(out)?;
    }
    Ok(())
}

/// Page header, then one line per tweet with its resolved author and media
fn write_summary(collection: &ResultCollection, page: usize, out: &mut impl Write) -> Result<()> {
    let count = collection
        .meta()
        .and_then(|meta| meta.result_count)
        .map_or_else(|| collection.len().to_string(), |count| count.to_string());
    writeln!(out, "page {page}: {count} tweets")?;

    for tweet in collection {
        let id = tweet.id.as_deref().unwrap_or("?");
        let author = collection
            .expansions()
            .and_then(|expansions| expansions.author_of(tweet))
            .and_then(|user| user.username.as_deref())
            .map_or_else(
                || tweet.author_id.clone().unwrap_or_else(|| "?".to_string()),
                |username| format!("@{username}"),
            );
        let media = collection
            .expansions()
            .map_or(0, |expansions| {
                expansions
                    .media_of(tweet)
                    .iter()
                    .filter(|(_, media)| media.is_some())
                    .count()
            });
        let text = tweet.text.as_deref().unwrap_or_default().replace('\n', " ");
        writeln!(out, "  {id} {author} media={media} {text}")?;
    }

    for error in collection.errors() {
        writeln!(
            out,
            "  error: {}",
            error.detail.as_deref().or(error.title.as_deref()).unwrap_or("unknown")
        )?;
    }
    if let Some(token) = collection.meta().and_then(|meta| meta.next_token.as_deref()) {
        writeln!(out, "  next_token={token}")?;
    }
    Ok(())
}
