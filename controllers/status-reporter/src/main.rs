//! Operator Status Reporter
//!
//! Publishes the operator's health to the cluster version authority through
//! its `ClusterOperator` status.
//!
//! The reporter polls the health of the operator's dependency and the
//! versions it has published, and reports Available, Progressing or Failing
//! accordingly until the operator is Available or the process is stopped.

mod conditions;
mod config;
mod controller;
mod equality;
mod error;
mod poller;
mod reporter;
mod versions;

use anyhow::Context;
use config::ReporterConfig;
use controller::Controller;
use poller::PollOutcome;
use rustls::crypto::CryptoProvider;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if CryptoProvider::install_default(rustls::crypto::ring::default_provider()).is_err() {
        warn!("rustls crypto provider already installed");
    }

    info!("Starting status reporter");

    // Load configuration from environment variables
    let config = ReporterConfig::from_env().context("failed to load configuration")?;

    info!("Configuration:");
    info!("  ClusterOperator: {}", config.operator_name);
    info!("  Dependency: {}", config.dependency_name);
    info!("  Namespace: {}", config.operator_namespace);
    info!("  Versions: {}", versions::format_operand_versions(&config.versions));
    info!("  Poll interval: {:?}", config.poll_interval);

    let controller = Controller::new(config)
        .await
        .context("failed to initialize status reporter")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    match controller.run(shutdown_rx).await {
        PollOutcome::Available => info!("Operator reported available, exiting"),
        PollOutcome::Cancelled => info!("Status reporting stopped before operator became available"),
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
