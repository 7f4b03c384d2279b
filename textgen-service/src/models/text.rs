use serde::{Deserialize, Serialize};
use validator::Validate;

pub const SUCCESS_STATUS: &str = "success";

/// Body of `POST /generate-text`.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateTextRequest {
    #[serde(default)]
    #[validate(
        required(message = "Prompt is required"),
        length(min = 1, message = "Prompt is required")
    )]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateTextResponse {
    pub text: String,
    pub status: String,
}

impl GenerateTextResponse {
    pub fn success(text: String) -> Self {
        Self {
            text,
            status: SUCCESS_STATUS.to_string(),
        }
    }
}

/// Body of `POST /analyze`.
#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeRequest {
    #[serde(default)]
    #[validate(
        required(message = "Text is required"),
        length(min = 1, message = "Text is required")
    )]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
    pub status: String,
}

impl AnalyzeResponse {
    pub fn success(analysis: String) -> Self {
        Self {
            analysis,
            status: SUCCESS_STATUS.to_string(),
        }
    }
}
