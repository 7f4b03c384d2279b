//! Mock provider implementation for testing.

use super::{GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// One recorded `generate` invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub prompt: String,
    pub params: GenerationParams,
}

enum Reply {
    Text(String),
    Echo,
    Fail(ProviderError),
}

/// Mock text provider that records every call it receives.
pub struct MockTextProvider {
    reply: Reply,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTextProvider {
    /// Always answers with `text`.
    pub fn returning(text: impl Into<String>) -> Self {
        Self::with_reply(Reply::Text(text.into()))
    }

    /// Answers with `"Mock response for: <prompt>"`.
    pub fn echoing() -> Self {
        Self::with_reply(Reply::Echo)
    }

    /// Always fails with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self::with_reply(Reply::Fail(error))
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                prompt: prompt.to_string(),
                params: *params,
            });
        }

        let text = match &self.reply {
            Reply::Text(text) => text.clone(),
            Reply::Echo => format!("Mock response for: {}", prompt),
            Reply::Fail(error) => return Err(error.clone()),
        };

        Ok(ProviderResponse {
            text,
            input_tokens: Some(prompt.len() as i32 / 4),
            output_tokens: Some(10),
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.reply {
            Reply::Fail(error) => Err(error.clone()),
            _ => Ok(()),
        }
    }

    fn model(&self) -> &str {
        "mock"
    }
}
