//! Facemood Core Library
//!
//! This crate provides configuration, error types and domain models shared by
//! every Facemood component.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{ClassificationResult, Emotion, UploadRecord};
