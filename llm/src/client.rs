//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! This module provides the [`GeminiClient`] type which implements the
//! [`LLMClient`] trait. Each call issues exactly one POST; failures are
//! reported through [`LLMError`] and never retried.

use crate::config::GeminiConfig;
use crate::traits::{LLMClient, LLMError};
use crate::wire::{GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl LLMClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LLMError> {
        let endpoint = self.config.endpoint();
        debug!(%endpoint, prompt_len = prompt.len(), "requesting generation");
        let resp = self
            .client
            .post(&endpoint)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "generation endpoint returned an error status");
            return Err(LLMError::ApiStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = resp.bytes().await?;
        let parsed: GenerateContentResponse = serde_json::from_slice(&body)
            .map_err(|e| LLMError::InvalidResponse(e.to_string()))?;
        parsed.into_first_text().ok_or(LLMError::MissingText)
    }
}
