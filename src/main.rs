use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::task::spawn_blocking;
use tokio::{select, signal};
use tracing::{error, info, warn};

use api::AppState;
use config::{Args, Config};
use feed::GtfsFeed;

mod api;
mod config;
mod dal;
mod feed;
mod model;
mod services;
mod telemetry;
mod utils;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    _ = dotenv();
    let config = Config::from_args(Args::parse())?;

    let telemetry =
        telemetry::init_tracing(&config.log_dir, config.otlp_endpoint.as_deref())?;

    info!("{config:?}");

    let gtfs_dir = config.gtfs_dir.clone();
    let feed = spawn_blocking(move || GtfsFeed::load_from_dir(&gtfs_dir))
        .await?
        .with_context(|| format!("couldn't load the GTFS feed in {}", config.gtfs_dir.display()))?;

    if feed.tables().stops.is_empty() {
        warn!("the feed has no usable stops, nearby bus lookups will always be empty");
    }

    let app = api::router(AppState::new(feed, config.timezone));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("couldn't bind {}", config.bind_addr))?;
    info!("listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    telemetry.shutdown();

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("couldn't listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("couldn't listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    select! {
        _ = ctrl_c => info!("got ctrl-c, shutting down"),
        _ = terminate => info!("got SIGTERM, shutting down"),
    }
}
