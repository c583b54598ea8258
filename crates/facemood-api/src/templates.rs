//! HTML page rendering

use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use facemood_core::{AppError, ClassificationResult};

use crate::error::HttpAppError;
use crate::services::upload::PipelineOutcome;

/// Home page: upload form, plus the last result and image when present.
#[derive(Template, Default)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub emotion: Option<String>,
    pub image: Option<String>,
}

impl HomeTemplate {
    pub fn with_result(result: &ClassificationResult, image: Option<String>) -> Self {
        Self {
            emotion: Some(result.to_string()),
            image,
        }
    }

    pub fn from_outcome(outcome: PipelineOutcome) -> Self {
        Self::with_result(&outcome.result, outcome.image)
    }

    pub fn render_response(self) -> Result<Response, HttpAppError> {
        let html = self
            .render()
            .map_err(|e| AppError::Internal(format!("Template rendering failed: {}", e)))?;
        Ok(Html(html).into_response())
    }
}
