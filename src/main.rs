//! album-proxy — HTTP front for a Nextcloud photo album.
//!
//! Serves the album's images straight from WebDAV and, for each image, a
//! compact JSON summary of its EXIF capture date and orientation. Every
//! request is independent: one authenticated fetch, optionally an EXIF
//! decode, then the response. Nothing is stored locally.

#![warn(clippy::all)]

mod cli;
mod config;
mod dav;
mod metadata;
mod server;
mod shutdown;
mod types;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_filter())),
        )
        .init();

    let config = config::Config::from_cli(cli)?;
    tracing::debug!(?config, "Loaded configuration");

    let store = dav::DavClient::new(&config)?;
    let app = server::router(server::AppState::new(Arc::new(store)));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    let local_addr = listener.local_addr()?;
    tracing::info!(album = %config.album, "Listening on http://{}", local_addr);

    let shutdown_token = shutdown::install_signal_handler()?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown_token.cancelled().await })
        .await
        .context("HTTP server failed")?;

    tracing::info!("Server stopped");
    Ok(())
}
