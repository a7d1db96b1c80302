//! Command-line importer for Pleco flashcard exports.
//!
//! Parses an export with `pleco-core` and merges it into a local SQLite note
//! collection.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod templates;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::config::Config;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::from_env().with_db_path(cli.db);
    tracing::debug!(db = %config.db_path.display(), "loaded configuration");

    match cli.command {
        Commands::Import(args) => commands::run_import(config, args, cli.json).await,
        Commands::Stats { deck } => commands::run_stats(&config, &deck, cli.json),
    }
}
