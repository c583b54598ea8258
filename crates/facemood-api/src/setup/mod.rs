//! Application setup and initialization

pub mod classifier;
pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use facemood_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.is_production())?;

    tracing::info!(
        environment = %config.base.environment,
        "Configuration loaded and validated successfully"
    );

    let uploads = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;
    let classifier = classifier::setup_classifier(&config);

    let state = Arc::new(AppState::new(config.clone(), storage, uploads, classifier));

    let router = routes::setup_routes(&config, state.clone()).await?;

    Ok((state, router))
}
