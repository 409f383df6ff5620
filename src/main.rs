use std::sync::Arc;

use atalaya::{
    api::HttpTrafficApi,
    config::AppConfig,
    http_client::{create_base_client, create_http_client},
    presenter::ConsolePresenter,
    providers::{FixedPositionBackend, LocationSource},
    tracker::LocationTracker,
};
use clap::{Parser, Subcommand};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs the location tracking loop.
    Run,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber =
        FmtSubscriber::builder().with_env_filter(EnvFilter::from_default_env()).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => run_tracker().await?,
    }

    Ok(())
}

async fn run_tracker() -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!("Loading application configuration...");
    let config = AppConfig::new(None)?;
    tracing::debug!(base_url = %config.base_url, "Configuration loaded.");

    let http_client =
        Arc::new(create_http_client(&config.http_retry, create_base_client()?));
    let api = Arc::new(HttpTrafficApi::new(
        config.base_url.clone(),
        http_client,
        &config.session_cookie,
        &config.csrf_cookie_name,
    ));

    let backend = Arc::new(FixedPositionBackend::from_config(&config.location));
    let source = Arc::new(LocationSource::new(backend, config.location.watch_poll));

    // An unsupported positioning backend is fatal; anything transient is
    // handled inside the loop.
    source.probe().await?;
    tracing::info!("Position backend ready.");

    let presenter = Arc::new(ConsolePresenter::new());
    let cancel = CancellationToken::new();
    let (tracker, _handle) =
        LocationTracker::new(api, source, presenter, cancel.clone());

    let tracker_task = tokio::spawn(tracker.run());
    tracing::info!("Location tracker started.");

    wait_for_shutdown_signal().await;
    cancel.cancel();

    if tokio::time::timeout(config.shutdown_timeout, tracker_task).await.is_err() {
        tracing::warn!(
            timeout_secs = config.shutdown_timeout.as_secs(),
            "Tracker did not wind down in time; aborting."
        );
    }
    tracing::info!("Shutdown complete.");

    Ok(())
}

async fn wait_for_shutdown_signal() {
    let ctrl_c = signal::ctrl_c();

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to register SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("SIGINT (Ctrl+C) received, initiating graceful shutdown."),
        _ = terminate => tracing::info!("SIGTERM received, initiating graceful shutdown."),
    }
}
