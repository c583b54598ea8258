//! Upload-and-classify service
//!
//! One linear flow per request: validate the filename, store the blob, record
//! the audit row, then classify when a model is loaded. Validation problems
//! and classification problems are ordinary outcomes; only storage and
//! database errors surface as [`PipelineFailure`].

use std::any::Any;
use std::sync::Arc;

use facemood_core::{AppError, ClassificationResult};
use facemood_processing::classify_image;

use crate::state::AppState;

/// What the home page should show after an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub result: ClassificationResult,
    /// Stored filename; set once the blob has been written.
    pub image: Option<String>,
}

impl PipelineOutcome {
    fn rejected(result: ClassificationResult) -> Self {
        Self {
            result,
            image: None,
        }
    }
}

/// A system error that aborted the pipeline after validation.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct PipelineFailure(#[from] pub AppError);

pub struct UploadService {
    state: Arc<AppState>,
}

impl UploadService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Run the pipeline for one uploaded file.
    ///
    /// # Errors
    /// Storage and database failures. Everything else is reported through
    /// [`PipelineOutcome::result`].
    #[tracing::instrument(skip(self, data), fields(size_bytes = data.len()))]
    pub async fn handle(
        &self,
        filename: &str,
        data: Vec<u8>,
    ) -> Result<PipelineOutcome, PipelineFailure> {
        let stored_name = match self.state.validator.validate_all(filename) {
            Ok(name) => name,
            Err(err) => {
                tracing::debug!(error = %err, "Upload rejected");
                return Ok(PipelineOutcome::rejected(err.into()));
            }
        };

        self.state
            .storage
            .upload(&stored_name, data)
            .await
            .map_err(AppError::from)?;

        let record = self.state.uploads.insert_now(&stored_name).await?;
        tracing::info!(
            upload_id = record.id,
            filename = %record.filename,
            timestamp = %record.formatted_timestamp(),
            "Upload stored"
        );

        let result = self.classify(&stored_name).await;
        Ok(PipelineOutcome {
            result,
            image: Some(stored_name),
        })
    }

    /// Read the stored blob back and run the classifier off the async runtime.
    async fn classify(&self, key: &str) -> ClassificationResult {
        let Some(classifier) = self.state.classifier.clone() else {
            return ClassificationResult::Pending;
        };

        let data = match self.state.storage.download(key).await {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(error = %err, key = %key, "Failed to read stored upload");
                return ClassificationResult::UnreadableImage;
            }
        };

        match tokio::task::spawn_blocking(move || classify_image(classifier.as_ref(), &data)).await
        {
            Ok(result) => result,
            Err(err) => {
                let message = if err.is_panic() {
                    panic_message(err.into_panic())
                } else {
                    err.to_string()
                };
                tracing::error!(error = %message, "Classification task failed");
                ClassificationResult::PredictionError(message)
            }
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "classifier panicked".to_string()
    }
}
