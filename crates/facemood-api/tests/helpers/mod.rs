//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p facemood-api --test upload_test`.
//! Every app gets its own temp directory for the SQLite file and uploads.

pub mod fixtures;

use axum_test::TestServer;
use facemood_api::setup::routes;
use facemood_api::state::AppState;
use facemood_core::Config;
use facemood_db::{init_schema, UploadRepository};
use facemood_processing::Classifier;
use facemood_storage::{LocalStorage, Storage};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Test application: server, shared state, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.state.config.upload_folder.clone()
    }

    /// Number of files in the upload directory.
    pub fn stored_files(&self) -> usize {
        std::fs::read_dir(self.upload_dir())
            .expect("Failed to read upload dir")
            .count()
    }

    pub async fn row_count(&self) -> i64 {
        self.state.uploads.count().await.expect("Failed to count uploads")
    }

    pub async fn rows_for(&self, filename: &str) -> i64 {
        self.state
            .uploads
            .count_for(filename)
            .await
            .expect("Failed to count uploads")
    }
}

/// Builder-style options for [`setup_test_app_with`].
#[derive(Default)]
pub struct TestAppOptions {
    pub classifier: Option<Arc<dyn Classifier>>,
    /// Replaces the local filesystem store.
    pub storage: Option<Arc<dyn Storage>>,
    pub allowed_extensions: Option<Vec<String>>,
    /// Leave the database without an `uploads` table so every insert fails.
    pub skip_schema: bool,
}

/// Setup test app without a model.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(TestAppOptions::default()).await
}

pub async fn setup_test_app_with_classifier(classifier: Arc<dyn Classifier>) -> TestApp {
    setup_test_app_with(TestAppOptions {
        classifier: Some(classifier),
        ..Default::default()
    })
    .await
}

pub async fn setup_test_app_with(options: TestAppOptions) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let mut config = Config::with_paths(
        temp_dir.path().join("database.db"),
        temp_dir.path().join("uploads"),
    );
    if let Some(extensions) = options.allowed_extensions {
        config.allowed_extensions = extensions;
    }

    let uploads = UploadRepository::new(&config.database_path);
    if !options.skip_schema {
        init_schema(&uploads)
            .await
            .expect("Failed to initialize schema");
    }

    let local: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(&config.upload_folder)
            .await
            .expect("Failed to create local storage"),
    );
    let storage = options.storage.unwrap_or(local);

    let state = Arc::new(AppState::new(
        config.clone(),
        storage,
        uploads,
        options.classifier,
    ));

    let router = routes::setup_routes(&config, state.clone())
        .await
        .expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        state,
        _temp_dir: temp_dir,
    }
}
