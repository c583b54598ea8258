//! Configuration module
//!
//! Settings are read from the environment (and an optional `.env` file) once at
//! startup and then passed explicitly into the services that need them.

use std::env;
use std::path::PathBuf;

use crate::constants::DEFAULT_ALLOWED_EXTENSIONS;

const SERVER_HOST: &str = "0.0.0.0";
const SERVER_PORT: u16 = 5000;
const DATABASE_PATH: &str = "database.db";
const UPLOAD_FOLDER: &str = "uploads";
const MODEL_PATH: &str = "face_emotionModel.onnx";
const MAX_FILE_SIZE_MB: usize = 10;

/// Server-level settings.
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    /// SQLite database file holding the `uploads` audit table.
    pub database_path: PathBuf,
    /// Directory where uploaded images are written.
    pub upload_folder: PathBuf,
    /// Optional serialized classifier; a missing file is not an error.
    pub model_path: PathBuf,
    pub allowed_extensions: Vec<String>,
    pub max_file_size_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let allowed_extensions = env::var("ALLOWED_EXTENSIONS")
            .map(|raw| parse_extensions(&raw))
            .unwrap_or_else(|_| default_extensions());

        let config = Config {
            base: BaseConfig {
                server_host: env::var("SERVER_HOST").unwrap_or_else(|_| SERVER_HOST.to_string()),
                server_port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| SERVER_PORT.to_string())
                    .parse()
                    .unwrap_or(SERVER_PORT),
                environment,
            },
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| DATABASE_PATH.to_string())
                .into(),
            upload_folder: env::var("UPLOAD_FOLDER")
                .unwrap_or_else(|_| UPLOAD_FOLDER.to_string())
                .into(),
            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| MODEL_PATH.to_string())
                .into(),
            allowed_extensions,
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
        };

        config.validate()?;
        Ok(config)
    }

    /// Defaults for everything except the two on-disk locations.
    pub fn with_paths(database_path: impl Into<PathBuf>, upload_folder: impl Into<PathBuf>) -> Self {
        Config {
            base: BaseConfig {
                server_host: SERVER_HOST.to_string(),
                server_port: SERVER_PORT,
                environment: "development".to_string(),
            },
            database_path: database_path.into(),
            upload_folder: upload_folder.into(),
            model_path: MODEL_PATH.into(),
            allowed_extensions: default_extensions(),
            max_file_size_bytes: MAX_FILE_SIZE_MB * 1024 * 1024,
        }
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "ALLOWED_EXTENSIONS must list at least one extension"
            ));
        }

        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }

        if self.upload_folder.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("UPLOAD_FOLDER must not be empty"));
        }

        if self.database_path.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("DATABASE_PATH must not be empty"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.base.server_host, self.base.server_port)
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_bytes
    }
}

fn default_extensions() -> Vec<String> {
    DEFAULT_ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

/// Parse a comma-separated extension list ("png, .JPG,gif") into lowercase
/// extensions without the leading dot.
pub fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_start_matches('.').to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
