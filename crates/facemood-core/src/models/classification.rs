//! Render-ready outcome of a single upload request.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::models::Emotion;

/// What the home page shows after an upload. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationResult {
    Emotion(Emotion),
    /// No classifier was loaded at startup.
    Pending,
    NoFileSelected,
    InvalidFileType,
    InvalidFilename,
    /// The stored blob could not be read back or decoded.
    UnreadableImage,
    UnknownIndex(usize),
    PredictionError(String),
    UploadFailed(String),
}

impl From<Emotion> for ClassificationResult {
    fn from(emotion: Emotion) -> Self {
        ClassificationResult::Emotion(emotion)
    }
}

impl Display for ClassificationResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ClassificationResult::Emotion(emotion) => write!(f, "{}", emotion),
            ClassificationResult::Pending => f.write_str("prediction pending (model not loaded)"),
            ClassificationResult::NoFileSelected => f.write_str("no file selected"),
            ClassificationResult::InvalidFileType => f.write_str("invalid file type"),
            ClassificationResult::InvalidFilename => f.write_str("invalid filename"),
            ClassificationResult::UnreadableImage => f.write_str("failed to read uploaded image"),
            ClassificationResult::UnknownIndex(idx) => {
                write!(f, "unknown prediction index {}", idx)
            }
            ClassificationResult::PredictionError(msg) => write!(f, "prediction error: {}", msg),
            ClassificationResult::UploadFailed(msg) => write!(f, "upload failed: {}", msg),
        }
    }
}
