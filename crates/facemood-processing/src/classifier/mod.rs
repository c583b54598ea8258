//! Emotion classification
//!
//! [`Classifier`] is the capability the upload pipeline holds as an optional
//! `Arc<dyn Classifier>`. Implementations only produce raw scores; picking the
//! winning class and mapping it to an [`Emotion`] happens here.

#[cfg(feature = "onnx")]
pub mod onnx;

use facemood_core::{ClassificationResult, Emotion};

use crate::image::FaceTensor;

/// Position of the winning score in a classifier output.
pub type ClassIndex = usize;

pub trait Classifier: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &str;

    /// One score per class for a single face.
    fn scores(&self, face: &FaceTensor) -> Result<Vec<f32>, anyhow::Error>;

    fn infer(&self, face: &FaceTensor) -> Result<ClassIndex, anyhow::Error> {
        argmax(&self.scores(face)?)
    }
}

/// Index of the largest score; the first one wins on ties.
pub fn argmax(scores: &[f32]) -> Result<ClassIndex, anyhow::Error> {
    let mut iter = scores.iter().enumerate();
    let (mut best_idx, mut best) = iter
        .next()
        .map(|(i, s)| (i, *s))
        .ok_or_else(|| anyhow::anyhow!("classifier returned no scores"))?;

    for (idx, &score) in iter {
        if score > best || best.is_nan() {
            best_idx = idx;
            best = score;
        }
    }
    Ok(best_idx)
}

/// Decode, preprocess and classify one stored image.
///
/// Never fails: decode problems, inference errors and out-of-vocabulary
/// indices all come back as the matching [`ClassificationResult`].
pub fn classify_image(classifier: &dyn Classifier, data: &[u8]) -> ClassificationResult {
    let face = match FaceTensor::from_bytes(data) {
        Ok(face) => face,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to decode uploaded image");
            return ClassificationResult::UnreadableImage;
        }
    };

    match classifier.infer(&face) {
        Ok(idx) => match Emotion::from_index(idx) {
            Some(emotion) => {
                tracing::debug!(
                    classifier = classifier.name(),
                    index = idx,
                    emotion = %emotion,
                    "Classified upload"
                );
                ClassificationResult::Emotion(emotion)
            }
            None => {
                tracing::warn!(classifier = classifier.name(), index = idx, "Prediction index outside vocabulary");
                ClassificationResult::UnknownIndex(idx)
            }
        },
        Err(e) => {
            tracing::error!(classifier = classifier.name(), error = %e, "Inference failed");
            ClassificationResult::PredictionError(e.to_string())
        }
    }
}
