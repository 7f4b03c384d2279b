use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "textgen-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Ready once the upstream accepts our credential.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.generator.health_check().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, model = %state.generator.model(), "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
