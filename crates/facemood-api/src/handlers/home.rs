use axum::response::Response;

use crate::error::HttpAppError;
use crate::templates::HomeTemplate;

/// Render the upload form.
pub async fn home() -> Result<Response, HttpAppError> {
    HomeTemplate::default().render_response()
}
