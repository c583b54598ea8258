//! Facemood API Library
//!
//! This crate provides the HTTP handlers, the upload-and-classify service and
//! application setup.

// Module declarations
mod handlers;
pub mod services;
pub mod setup;
pub mod telemetry;
pub mod templates;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::upload::{PipelineFailure, PipelineOutcome, UploadService};
pub use state::AppState;
