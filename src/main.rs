mod books_api;
mod cli;
mod config;
mod domain;
mod pages;
mod store;

use std::{path::Path, sync::Arc};

use clap::Parser;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt::SubscriberBuilder, prelude::*};

use books_api::BooksClient;
use config::Config;
use store::CatalogStore;

type BookstandResult<T> = anyhow::Result<T>;

#[tokio::main]
async fn main() -> BookstandResult<()> {
    // Initialize tracing (logs). Respect RUST_LOG if set, default to info for our crate and warn for deps.
    let default_filter = format!("{}=info,reqwest=warn,h2=warn", env!("CARGO_PKG_NAME"));
    let env_filter = std::env::var("RUST_LOG").unwrap_or(default_filter);
    SubscriberBuilder::default()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .finish()
        .with(ErrorLayer::default())
        .init();

    // Load environment variables from .env files
    if Path::new(".env.local").exists() {
        dotenvy::from_filename(".env.local")?;
    } else if Path::new(".env").exists() {
        dotenvy::from_filename(".env")?;
    };

    let args = cli::Cli::parse();

    let config = Config::load();
    match config.validate() {
        Ok(_) => {}
        Err(e) => {
            return Err(anyhow::anyhow!(e));
        }
    }

    let client = BooksClient::new(&config.books_api_base_url)?;
    tracing::debug!(base_url = %config.books_api_base_url, "configured books client");
    let store = CatalogStore::new(Arc::new(client.clone()));

    cli::run(&store, &client, args.command).await
}
