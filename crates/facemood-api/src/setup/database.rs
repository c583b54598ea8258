//! Database setup and initialization

use anyhow::{Context, Result};
use facemood_core::Config;
use facemood_db::{init_schema, UploadRepository};

/// Create the SQLite file if needed and make sure the `uploads` table exists.
pub async fn setup_database(config: &Config) -> Result<UploadRepository> {
    tracing::info!(path = %config.database_path.display(), "Opening database...");
    let uploads = UploadRepository::new(&config.database_path);

    init_schema(&uploads)
        .await
        .context("Failed to initialize database schema")?;

    let existing = uploads
        .count()
        .await
        .context("Failed to query uploads table")?;
    tracing::info!(existing_uploads = existing, "Database ready");

    Ok(uploads)
}
