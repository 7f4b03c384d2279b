//! Model invoker shared by the HTTP handlers.
//!
//! Each operation pairs a prompt with its fixed sampling preset and submits
//! it to the configured [`TextProvider`].

use crate::services::metrics::record_provider_call;
use crate::services::providers::{GenerationParams, ProviderError, TextProvider};
use std::sync::Arc;
use std::time::Instant;

/// Text placed in front of the caller's input for `/analyze`.
pub const ANALYSIS_PROMPT_PREFIX: &str = "Analyze the following text and provide key insights: ";

pub fn analysis_prompt(text: &str) -> String {
    format!("{}{}", ANALYSIS_PROMPT_PREFIX, text)
}

#[derive(Clone)]
pub struct TextGenerator {
    provider: Arc<dyn TextProvider>,
}

impl TextGenerator {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    /// Free-form generation with the creative preset.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
        self.invoke("generate_text", prompt, &GenerationParams::creative())
            .await
    }

    /// Insight extraction over `text`, leaving sampling to the provider.
    pub async fn analyze(&self, text: &str) -> Result<String, ProviderError> {
        self.invoke(
            "analyze",
            &analysis_prompt(text),
            &GenerationParams::provider_default(),
        )
        .await
    }

    pub async fn health_check(&self) -> Result<(), ProviderError> {
        self.provider.health_check().await
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    async fn invoke(
        &self,
        operation: &'static str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        let start = Instant::now();
        let result = self.provider.generate(prompt, params).await;
        let elapsed = start.elapsed();

        record_provider_call(operation, self.provider.model(), result.is_ok(), elapsed);

        match result {
            Ok(response) => {
                tracing::info!(
                    operation,
                    model = %self.provider.model(),
                    input_tokens = ?response.input_tokens,
                    output_tokens = ?response.output_tokens,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Model call succeeded"
                );
                Ok(response.text)
            }
            Err(e) => {
                tracing::error!(
                    operation,
                    model = %self.provider.model(),
                    error = %e,
                    "Model call failed"
                );
                Err(e)
            }
        }
    }
}
