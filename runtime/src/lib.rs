//! Runtime for the memory keeper: HTTP API, terminal chat and logging.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use keeper::{ConversationScript, ScriptError, Session, StoryGenerator};
use llm::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use llm::{GeminiClient, GeminiConfig};
use tracing::info;

pub mod chat;
pub mod logging;
pub mod server;

pub use logging::init_logging;

/// Settings shared by every command. Values come from flags or the environment.
#[derive(Clone, clap::Args)]
pub struct Settings {
    /// API key for the text-generation endpoint
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: String,
    /// Model used to write the story
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,
    /// Base URL of the text-generation endpoint
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
    /// Seconds to wait for a story before giving up
    #[arg(long, env = "STORY_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,
    /// JSON file with the interviewer's `greeting` and `follow_up` lines
    #[arg(long)]
    pub script: Option<PathBuf>,
}

impl Settings {
    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig::new(self.api_key.clone())
            .with_model(self.model.clone())
            .with_base_url(self.base_url.clone())
    }

    pub fn conversation_script(&self) -> Result<ConversationScript, ScriptError> {
        match &self.script {
            Some(path) => ConversationScript::load(path),
            None => Ok(ConversationScript::default()),
        }
    }

    /// Build a fresh session talking to the configured endpoint.
    pub fn session(&self) -> Result<Session, ScriptError> {
        let script = self.conversation_script()?;
        let client = Arc::new(GeminiClient::new(self.gemini()));
        let generator =
            StoryGenerator::new(client).with_timeout(Duration::from_secs(self.timeout_secs));
        info!(model = %self.model, base_url = %self.base_url, timeout_secs = self.timeout_secs, "session configured");
        Ok(Session::with_generator(script, generator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        settings: Settings,
    }

    #[test]
    fn flags_fill_settings() {
        let cli = Cli::try_parse_from([
            "memory-keeper",
            "--api-key",
            "k",
            "--model",
            "m",
            "--timeout-secs",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.settings.model, "m");
        assert_eq!(cli.settings.timeout_secs, 5);
        assert_eq!(
            cli.settings.gemini().endpoint(),
            format!("{DEFAULT_BASE_URL}/v1beta/models/m:generateContent")
        );
    }

    #[test]
    fn session_uses_default_script() {
        let cli = Cli::try_parse_from(["memory-keeper", "--api-key", "k"]).unwrap();
        let session = cli.settings.session().unwrap();
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.script(), &ConversationScript::default());
    }

    #[test]
    fn missing_script_file_is_an_error() {
        let cli = Cli::try_parse_from([
            "memory-keeper",
            "--api-key",
            "k",
            "--script",
            "/definitely/not/here.json",
        ])
        .unwrap();
        assert!(matches!(cli.settings.session(), Err(ScriptError::Io(_))));
    }
}
