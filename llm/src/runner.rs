use crate::config::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::traits::{LLMClient, LLMError};
use crate::GeminiClient;

/// Read the API key from the `GEMINI_API_KEY` environment variable.
pub fn api_key_from_env() -> Option<String> {
    std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty())
}

/// Read the model name from the `GEMINI_MODEL` environment variable.
pub fn model_from_env() -> String {
    std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into())
}

/// Read the endpoint base URL from the `GEMINI_BASE_URL` environment variable.
pub fn base_url_from_env() -> String {
    std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into())
}

/// Build a [`GeminiConfig`] from the environment. Returns `None` when no API
/// key is configured.
pub fn config_from_env() -> Option<GeminiConfig> {
    let key = api_key_from_env()?;
    Some(
        GeminiConfig::new(key)
            .with_model(model_from_env())
            .with_base_url(base_url_from_env()),
    )
}

/// Create a [`GeminiClient`] using environment configuration.
pub fn client_from_env() -> Option<GeminiClient> {
    config_from_env().map(GeminiClient::new)
}

/// Convenience helper to generate text for a prompt using environment configuration.
pub async fn run_from_env(prompt: &str) -> Result<String, LLMError> {
    let client = client_from_env().ok_or(LLMError::MissingApiKey)?;
    client.generate(prompt).await
}

#[cfg(test)]
mod tests {
    use super::*;

    // The only test in this crate that touches these variables.
    #[tokio::test]
    async fn environment_drives_config() {
        std::env::set_var("GEMINI_API_KEY", "env-key");
        std::env::set_var("GEMINI_MODEL", "env-model");
        std::env::set_var("GEMINI_BASE_URL", "http://localhost:1");
        let cfg = config_from_env().unwrap();
        assert_eq!(cfg.api_key, "env-key");
        assert_eq!(
            cfg.endpoint(),
            "http://localhost:1/v1beta/models/env-model:generateContent"
        );

        std::env::set_var("GEMINI_API_KEY", " ");
        assert!(config_from_env().is_none());
        std::env::remove_var("GEMINI_API_KEY");
        std::env::remove_var("GEMINI_MODEL");
        std::env::remove_var("GEMINI_BASE_URL");
        assert!(client_from_env().is_none());
        assert!(matches!(
            run_from_env("hi").await,
            Err(LLMError::MissingApiKey)
        ));
        assert_eq!(model_from_env(), DEFAULT_MODEL);
    }
}
