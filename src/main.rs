// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! tweetpage CLI
//!
//! Command-line interface for paging through tweet responses

use clap::Parser;
use tweetpage::cli::{Cli, Runner};

fn main() {
    let cli = Cli::parse();
    let runner = match Runner::new(cli) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Initialize logging
    let level: tracing::Level = runner.log_level().into();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    if let Err(e) = runner.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
