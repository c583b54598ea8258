use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::{IntoResponse, Redirect, Response},
};
use facemood_core::constants::IMAGE_FIELD;
use facemood_core::{AppError, ClassificationResult};

use crate::error::{log_error, HttpAppError};
use crate::services::upload::{PipelineFailure, UploadService};
use crate::state::AppState;
use crate::templates::HomeTemplate;

/// The `image` file part of the form.
struct ImageField {
    filename: String,
    data: Vec<u8>,
}

/// Find the first `image` part that carries a filename. Plain form fields
/// with the same name do not count as a file.
async fn extract_image_field(mut multipart: Multipart) -> Result<Option<ImageField>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(|s: &str| s.to_string()) else {
            continue;
        };

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

        return Ok(Some(ImageField {
            filename,
            data: data.to_vec(),
        }));
    }

    Ok(None)
}

fn render_failure(err: AppError) -> Result<Response, HttpAppError> {
    log_error(&err);
    HomeTemplate::with_result(&ClassificationResult::UploadFailed(err.to_string()), None)
        .render_response()
}

/// Upload handler
///
/// Redirects home when the request carries no `image` file part. Every other
/// outcome, failures included, renders the home page with status 200.
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_image"))]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpAppError> {
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::debug!(rejection = %rejection, "Upload without multipart body");
            return Ok(Redirect::to("/").into_response());
        }
    };

    let field = match extract_image_field(multipart).await {
        Ok(Some(field)) => field,
        Ok(None) => {
            tracing::debug!("Upload without image field");
            return Ok(Redirect::to("/").into_response());
        }
        Err(err) => return render_failure(err),
    };

    match UploadService::new(&state)
        .handle(&field.filename, field.data)
        .await
    {
        Ok(outcome) => HomeTemplate::from_outcome(outcome).render_response(),
        Err(PipelineFailure(err)) => render_failure(err),
    }
}
