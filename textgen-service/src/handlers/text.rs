use crate::models::{AnalyzeRequest, AnalyzeResponse, GenerateTextRequest, GenerateTextResponse};
use crate::startup::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use service_core::error::AppError;
use validator::Validate;

/// `POST /generate-text`
pub async fn generate_text(
    State(state): State<AppState>,
    payload: Result<Json<GenerateTextRequest>, JsonRejection>,
) -> Result<Json<GenerateTextResponse>, AppError> {
    let Json(request) = payload?;
    request.validate()?;
    let prompt = request.prompt.unwrap_or_default();

    let text = state.generator.generate_text(&prompt).await?;

    Ok(Json(GenerateTextResponse::success(text)))
}

/// `POST /analyze`
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(request) = payload?;
    request.validate()?;
    let text = request.text.unwrap_or_default();

    let analysis = state.generator.analyze(&text).await?;

    Ok(Json(AnalyzeResponse::success(analysis)))
}
