use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info};

use job_monitor::api::create_router;
use job_monitor::config::MonitorConfig;
use job_monitor::monitor::Monitor;
use job_monitor::notify;
use job_monitor::scheduler::spawn_scheduler;
use job_monitor::scrapers::CareerPageScraper;
use job_monitor::storage::JsonFileStorage;
use job_monitor::utils;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("job_monitor=info".parse()?),
        )
        .init();

    info!("Starting monitoring for remote Full Stack Engineer jobs...");

    // Load configuration
    let config = Arc::new(MonitorConfig::load()?);
    info!(
        sites = config.sites.len(),
        interval_secs = config.check_interval_seconds,
        "Configuration loaded"
    );

    // Initialize HTTP client with connection pooling
    let client = utils::http::create_client(&config)?;

    let scraper = Arc::new(CareerPageScraper::new(client, config.clone()));
    let storage = Arc::new(JsonFileStorage::new(&config.storage));
    let notifier = notify::from_config(&config.email)?;

    let monitor = Arc::new(Monitor::new(config.clone(), scraper, storage, notifier).await);

    // Run once immediately
    if let Err(e) = monitor.run_cycle().await {
        error!("Initial check cycle failed: {e:#}");
    }

    let scheduler = spawn_scheduler(monitor.clone(), config.check_interval());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Starting API server on http://{addr}");

    axum::serve(listener, create_router(monitor))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server error")?;

    scheduler.abort();
    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
