//! Health check endpoint

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

use crate::state::AppState;

/// Healthy service report
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"healthy"`
    pub status: &'static str,
    /// Configured model name
    pub model: String,
    /// Whether a document is attached
    pub has_pdf_context: bool,
}

/// Unhealthy service report
#[derive(Debug, Serialize)]
pub struct UnhealthyResponse {
    /// Always `"unhealthy"`
    pub status: &'static str,
    /// Why the health check failed
    pub error: String,
}

/// GET /health/ - Live test call against the model
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<UnhealthyResponse>)> {
    let session = state.session.read().await;

    match session.check_model().await {
        Ok(()) => Ok(Json(HealthResponse {
            status: "healthy",
            model: session.model_name().to_string(),
            has_pdf_context: session.has_document(),
        })),
        Err(e) => {
            tracing::error!(error = %e, model = %session.model_name(), "Health check failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(UnhealthyResponse {
                    status: "unhealthy",
                    error: e.to_string(),
                }),
            ))
        }
    }
}
