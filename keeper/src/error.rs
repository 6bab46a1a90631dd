use std::time::Duration;

use llm::LLMError;
use thiserror::Error;

/// Why a single story generation ended in failure.
#[derive(Debug, Error)]
pub enum StoryError {
    #[error(transparent)]
    Llm(#[from] LLMError),
    #[error("story generation timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),
}

/// Requests the session refuses before any network call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("a story is already being generated")]
    GenerationInFlight,
    #[error("nothing has been shared yet")]
    NothingToTell,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("could not read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("script field `{0}` is blank")]
    Blank(&'static str),
}
