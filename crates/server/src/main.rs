//! Backup Monitor - infrastructure dashboard service
//!
//! Serves the dashboard, clusters, workflows, alerts and reports view models
//! over HTTP, together with health probes and Prometheus metrics.

use anyhow::Result;
use backup_monitor::{api, config};
use monitor_lib::{
    health::{components, HealthRegistry},
    observability::{MonitorMetrics, StructuredLogger},
    DataProvider, InMemoryProvider,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const MONITOR_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // JSON logs, filtered by RUST_LOG
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting backup-monitor");

    let config = config::MonitorConfig::load()?;
    info!(instance = %config.instance_name, port = config.api_port, "Monitor configured");

    let health_registry = HealthRegistry::new();
    health_registry.register(components::API).await;

    // Slug conflicts in the catalog are fatal
    let provider = match InMemoryProvider::seeded() {
        Ok(provider) => provider,
        Err(err) => {
            error!(error = %err, code = err.code(), "Catalog failed validation");
            return Err(err.into());
        }
    };
    health_registry.register(components::CATALOG).await;
    health_registry.register(components::PROVIDER).await;

    let metrics = MonitorMetrics::new();
    let logger = StructuredLogger::new(&config.instance_name);
    logger.log_startup(
        MONITOR_VERSION,
        provider.list_clusters().await.len(),
        provider.list_workflows().await.len(),
        provider.list_alerts().await.len(),
    );

    let app_state = Arc::new(api::AppState::new(
        Arc::new(provider),
        health_registry.clone(),
        metrics,
        logger.clone(),
    ));
    app_state.refresh_alert_gauge().await;

    health_registry.set_ready(true).await;

    let api_handle = tokio::spawn(api::serve(config.api_port, app_state));

    tokio::select! {
        result = api_handle => {
            match result {
                Ok(Ok(())) => info!("API server stopped"),
                Ok(Err(err)) => {
                    error!(error = %err, "API server failed");
                    logger.log_shutdown("API server failed");
                    return Err(err);
                }
                Err(err) => {
                    error!(error = %err, "API server task panicked");
                    logger.log_shutdown("API server task panicked");
                    return Err(err.into());
                }
            }
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            logger.log_shutdown("SIGINT received");
        }
    }

    info!("Shutting down");
    Ok(())
}
