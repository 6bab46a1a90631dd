use async_trait::async_trait;
use thiserror::Error;

/// Message used when a successful response carries no story text.
pub const MISSING_TEXT_MESSAGE: &str = "Couldn't find story text in the API response.";

#[derive(Debug, Error)]
pub enum LLMError {
    /// The endpoint could not be reached or the body could not be read.
    #[error("network error: {0}")]
    Network(String),
    /// The endpoint answered with a body that is not the expected JSON.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// The endpoint answered with a status outside 200..=299.
    #[error("API Error: {status} {reason}")]
    ApiStatus { status: u16, reason: String },
    /// The response was well formed but had no text at the expected path.
    #[error("{}", MISSING_TEXT_MESSAGE)]
    MissingText,
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
}

impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest includes the request URL in its Display output, which would
        // leak the API key carried in the query string.
        let err = err.without_url();
        if err.is_decode() {
            LLMError::InvalidResponse(err.to_string())
        } else {
            LLMError::Network(err.to_string())
        }
    }
}

/// Something that turns a single prompt into generated text.
#[async_trait]
pub trait LLMClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LLMError>;
}
