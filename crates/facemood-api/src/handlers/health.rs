//! Health check handler

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub(crate) struct HealthCheckResponse {
    pub status: &'static str,
    pub model_loaded: bool,
}

/// Liveness plus whether predictions are available.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthCheckResponse {
            status: "healthy",
            model_loaded: state.model_loaded(),
        }),
    )
}
