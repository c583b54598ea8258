//! Application state shared by every handler.

use std::sync::Arc;

use facemood_core::Config;
use facemood_db::UploadRepository;
use facemood_processing::{Classifier, UploadValidator};
use facemood_storage::Storage;

/// Everything a request needs, built once at startup. The classifier is
/// read-only after load and `None` when no model could be loaded.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub uploads: UploadRepository,
    pub validator: UploadValidator,
    pub classifier: Option<Arc<dyn Classifier>>,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        uploads: UploadRepository,
        classifier: Option<Arc<dyn Classifier>>,
    ) -> Self {
        let validator = UploadValidator::new(config.allowed_extensions().to_vec());
        Self {
            config,
            storage,
            uploads,
            validator,
            classifier,
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.classifier.is_some()
    }
}
