//! Model loading
//!
//! The classifier is loaded once. Any failure leaves the process running
//! without predictions for its whole lifetime.

use facemood_core::Config;
use facemood_processing::Classifier;
use std::sync::Arc;

#[cfg(feature = "onnx")]
pub fn setup_classifier(config: &Config) -> Option<Arc<dyn Classifier>> {
    use facemood_processing::OnnxClassifier;

    let path = &config.model_path;
    if !path.exists() {
        tracing::warn!(
            path = %path.display(),
            "Model file not found, predictions disabled"
        );
        return None;
    }

    match OnnxClassifier::load(path) {
        Ok(classifier) => {
            tracing::info!(
                path = %path.display(),
                layout = ?classifier.layout(),
                "Emotion model loaded"
            );
            Some(Arc::new(classifier))
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %format!("{:#}", e),
                "Failed to load emotion model, predictions disabled"
            );
            None
        }
    }
}

#[cfg(not(feature = "onnx"))]
pub fn setup_classifier(config: &Config) -> Option<Arc<dyn Classifier>> {
    tracing::info!(
        path = %config.model_path.display(),
        "Built without the onnx feature, predictions disabled"
    );
    None
}
