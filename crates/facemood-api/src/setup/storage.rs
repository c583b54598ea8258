//! Storage setup and initialization

use anyhow::{Context, Result};
use facemood_core::Config;
use facemood_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Create the upload directory if needed.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = LocalStorage::new(&config.upload_folder)
        .await
        .context("Failed to initialize upload storage")?;
    tracing::info!(
        path = %storage.base_path().display(),
        "Local storage initialized"
    );
    Ok(Arc::new(storage))
}
