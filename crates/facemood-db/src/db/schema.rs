//! Idempotent schema creation, run once at startup.

use facemood_core::AppError;
use sqlx::{Connection, SqliteConnection};

use super::uploads::UploadRepository;

const CREATE_UPLOADS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS uploads (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    filename TEXT NOT NULL,
    timestamp TEXT NOT NULL
)
"#;

/// Create the `uploads` table if it does not exist yet.
#[tracing::instrument(skip(repo), fields(db.table = "uploads"))]
pub async fn init_schema(repo: &UploadRepository) -> Result<(), AppError> {
    let mut conn: SqliteConnection = repo.connect().await?;
    sqlx::query(CREATE_UPLOADS_TABLE).execute(&mut conn).await?;
    conn.close().await?;
    tracing::info!("Database schema ready");
    Ok(())
}
