//! Upload audit repository: insert and list rows of the `uploads` table.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Local, NaiveDateTime, Timelike};
use facemood_core::constants::TIMESTAMP_FORMAT;
use facemood_core::{AppError, UploadRecord};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};

/// Row type for the uploads table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
struct UploadRow {
    id: i64,
    filename: String,
    timestamp: String,
}

impl UploadRow {
    fn into_record(self) -> Result<UploadRecord, AppError> {
        let timestamp = NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT)
            .map_err(|e| {
                AppError::Internal(format!(
                    "Upload {} has malformed timestamp {:?}: {}",
                    self.id, self.timestamp, e
                ))
            })?;
        Ok(UploadRecord {
            id: self.id,
            filename: self.filename,
            timestamp,
        })
    }
}

/// Repository for the uploads table.
#[derive(Clone, Debug)]
pub struct UploadRepository {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl UploadRepository {
    /// The database file (and its parent directory) is created on first
    /// connect.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));
        Self { path, options }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection; callers close it when done.
    pub(crate) async fn connect(&self) -> Result<SqliteConnection, AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Ok(SqliteConnection::connect_with(&self.options).await?)
    }

    /// Record an upload at the current local time.
    pub async fn insert_now(&self, filename: &str) -> Result<UploadRecord, AppError> {
        self.insert(filename, Local::now().naive_local()).await
    }

    /// Insert one audit row. `at` is truncated to whole seconds.
    #[tracing::instrument(skip(self), fields(db.table = "uploads"))]
    pub async fn insert(&self, filename: &str, at: NaiveDateTime) -> Result<UploadRecord, AppError> {
        let timestamp = at.with_nanosecond(0).unwrap_or(at);
        let formatted = timestamp.format(TIMESTAMP_FORMAT).to_string();

        let mut conn = self.connect().await?;
        let result = sqlx::query("INSERT INTO uploads (filename, timestamp) VALUES (?, ?)")
            .bind(filename)
            .bind(&formatted)
            .execute(&mut conn)
            .await?;
        conn.close().await?;

        let record = UploadRecord {
            id: result.last_insert_rowid(),
            filename: filename.to_string(),
            timestamp,
        };
        tracing::debug!(id = record.id, timestamp = %formatted, "Upload recorded");
        Ok(record)
    }

    /// Most recent uploads first.
    #[tracing::instrument(skip(self), fields(db.table = "uploads"))]
    pub async fn list(&self, limit: i64) -> Result<Vec<UploadRecord>, AppError> {
        let mut conn = self.connect().await?;
        let rows: Vec<UploadRow> = sqlx::query_as::<_, UploadRow>(
            "SELECT id, filename, timestamp FROM uploads ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&mut conn)
        .await?;
        conn.close().await?;

        rows.into_iter().map(UploadRow::into_record).collect()
    }

    #[tracing::instrument(skip(self), fields(db.table = "uploads"))]
    pub async fn count(&self) -> Result<i64, AppError> {
        let mut conn = self.connect().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM uploads")
            .fetch_one(&mut conn)
            .await?;
        conn.close().await?;
        Ok(count)
    }

    /// Number of rows recorded for one filename.
    #[tracing::instrument(skip(self), fields(db.table = "uploads"))]
    pub async fn count_for(&self, filename: &str) -> Result<i64, AppError> {
        let mut conn = self.connect().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM uploads WHERE filename = ?")
            .bind(filename)
            .fetch_one(&mut conn)
            .await?;
        conn.close().await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    async fn repo_in(dir: &Path) -> UploadRepository {
        let repo = UploadRepository::new(dir.join("database.db"));
        init_schema(&repo).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let dir = tempdir().unwrap();
        let repo = repo_in(dir.path()).await;
        init_schema(&repo).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn creates_missing_parent_directory() {
        let dir = tempdir().unwrap();
        let repo = UploadRepository::new(dir.path().join("nested").join("database.db"));
        init_schema(&repo).await.unwrap();
        assert!(repo.path().exists());
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let dir = tempdir().unwrap();
        let repo = repo_in(dir.path()).await;

        let first = repo.insert_now("face.png").await.unwrap();
        let second = repo.insert_now("face.png").await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(repo.count().await.unwrap(), 2);
        assert_eq!(repo.count_for("face.png").await.unwrap(), 2);
        assert_eq!(repo.count_for("other.png").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn timestamp_is_stored_with_second_precision() {
        let dir = tempdir().unwrap();
        let repo = repo_in(dir.path()).await;
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_micro_opt(14, 30, 15, 123_456)
            .unwrap();

        let inserted = repo.insert("face.png", at).await.unwrap();
        assert_eq!(inserted.formatted_timestamp(), "2024-03-09 14:30:15");

        let mut conn = repo.connect().await.unwrap();
        let raw: String = sqlx::query_scalar("SELECT timestamp FROM uploads WHERE id = ?")
            .bind(inserted.id)
            .fetch_one(&mut conn)
            .await
            .unwrap();
        assert_eq!(raw, "2024-03-09 14:30:15");

        let listed = repo.list(10).await.unwrap();
        assert_eq!(listed, vec![inserted]);
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let dir = tempdir().unwrap();
        let repo = repo_in(dir.path()).await;
        for name in ["a.png", "b.png", "c.png"] {
            repo.insert_now(name).await.unwrap();
        }

        let names: Vec<String> = repo
            .list(2)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.filename)
            .collect();
        assert_eq!(names, vec!["c.png".to_string(), "b.png".to_string()]);
    }
}
