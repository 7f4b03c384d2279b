//! AI provider abstractions and implementations.
//!
//! Handlers talk to a [`TextProvider`] trait object so the Gemini backend can
//! be swapped for the recording mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider operations.
///
/// The display text is what callers see in the `error` field of a 500
/// response, so variants carry the upstream message unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("{0}")]
    NotConfigured(String),

    #[error("{0}")]
    ApiError(String),

    #[error("{0}")]
    NetworkError(String),

    #[error("{0}")]
    InvalidResponse(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::UpstreamError(err.to_string())
    }
}

/// Result of a provider response.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub text: String,

    /// Input tokens consumed, when the provider reports them.
    pub input_tokens: Option<i32>,

    /// Output tokens generated, when the provider reports them.
    pub output_tokens: Option<i32>,
}

/// Sampling configuration sent alongside a prompt.
///
/// `None` fields are left to the provider's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationParams {
    /// Temperature (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Top-p sampling.
    pub top_p: Option<f32>,

    /// Top-k sampling.
    pub top_k: Option<i32>,

    /// Maximum output tokens.
    pub max_output_tokens: Option<i32>,
}

impl GenerationParams {
    /// High-diversity preset used for free-form generation.
    pub const fn creative() -> Self {
        Self {
            temperature: Some(0.9),
            top_p: Some(0.9),
            top_k: Some(40),
            max_output_tokens: None,
        }
    }

    /// Nothing set; the provider picks every sampling value.
    pub const fn provider_default() -> Self {
        Self {
            temperature: None,
            top_p: None,
            top_k: None,
            max_output_tokens: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::provider_default()
    }
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate text response.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Cheap credential/reachability probe.
    async fn health_check(&self) -> Result<(), ProviderError>;

    /// Model identifier, for logs and metrics.
    fn model(&self) -> &str;
}
