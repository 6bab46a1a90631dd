//! Turning a transcript into a story.
//!
//! [`StoryGenerator`] owns the single [`GenerationResult`] of a session. Only
//! one generation may be in flight: entry is a compare-and-set from any
//! settled state to [`GenerationResult::Pending`], and a second caller is
//! turned away with [`SessionError::GenerationInFlight`]. Whatever happens to
//! the request (error status, malformed body, timeout, panic, or the caller
//! dropping the future) the state leaves `Pending` before the call returns.

use std::sync::Arc;
use std::time::Duration;

use llm::LLMClient;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::conversation::Turn;
use crate::error::{SessionError, StoryError};
use crate::prompt::{PromptFragment, StoryPrompt};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Failure message left behind when a generation stops without settling.
pub const INTERRUPTED_MESSAGE: &str = "story generation was interrupted";

/// Outcome of the most recent generation. Each value replaces the last.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GenerationResult {
    #[default]
    Idle,
    Pending,
    Success {
        text: String,
    },
    Failure {
        message: String,
    },
}

impl GenerationResult {
    pub fn is_pending(&self) -> bool {
        matches!(self, GenerationResult::Pending)
    }

    pub fn story(&self) -> Option<&str> {
        match self {
            GenerationResult::Success { text } => Some(text),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            GenerationResult::Failure { message } => Some(message),
            _ => None,
        }
    }
}

impl From<Result<String, StoryError>> for GenerationResult {
    fn from(res: Result<String, StoryError>) -> Self {
        match res {
            Ok(text) => GenerationResult::Success { text },
            Err(e) => GenerationResult::Failure {
                message: e.to_string(),
            },
        }
    }
}

/// Restores a settled state if a generation exits without calling `settle`.
struct PendingGuard<'a> {
    state: &'a watch::Sender<GenerationResult>,
    settled: bool,
}

impl<'a> PendingGuard<'a> {
    fn new(state: &'a watch::Sender<GenerationResult>) -> Self {
        Self {
            state,
            settled: false,
        }
    }

    fn settle(mut self, result: GenerationResult) {
        self.state.send_replace(result);
        self.settled = true;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("story generation ended without a result");
            self.state.send_replace(GenerationResult::Failure {
                message: INTERRUPTED_MESSAGE.into(),
            });
        }
    }
}

pub struct StoryGenerator {
    client: Arc<dyn LLMClient>,
    prompt: StoryPrompt,
    timeout: Duration,
    state: watch::Sender<GenerationResult>,
}

impl StoryGenerator {
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        let (state, _) = watch::channel(GenerationResult::Idle);
        Self {
            client,
            prompt: StoryPrompt::default(),
            timeout: DEFAULT_TIMEOUT,
            state,
        }
    }

    /// Bound each request to the endpoint by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the default biographer prompt.
    pub fn with_prompt(mut self, prompt: StoryPrompt) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn current(&self) -> GenerationResult {
        self.state.borrow().clone()
    }

    /// Watch result changes, including the transition into `Pending`.
    pub fn subscribe(&self) -> watch::Receiver<GenerationResult> {
        self.state.subscribe()
    }

    /// Generate a story from `turns`.
    ///
    /// Returns the settled result, which is also stored as the current one.
    /// Rejected without side effects while another generation is pending.
    pub async fn generate(&self, turns: &[Turn]) -> Result<GenerationResult, SessionError> {
        let entered = self.state.send_if_modified(|state| {
            if state.is_pending() {
                false
            } else {
                *state = GenerationResult::Pending;
                true
            }
        });
        if !entered {
            warn!("story requested while another is pending");
            return Err(SessionError::GenerationInFlight);
        }
        let guard = PendingGuard::new(&self.state);

        let prompt = self.prompt.build_prompt(turns);
        info!(turns = turns.len(), "generating story");
        let outcome = match tokio::time::timeout(self.timeout, self.client.generate(&prompt)).await
        {
            Ok(res) => res.map_err(StoryError::from),
            Err(_) => Err(StoryError::Timeout(self.timeout)),
        };

        match &outcome {
            Ok(text) => info!(chars = text.chars().count(), "story generated"),
            Err(e) => warn!(error = %e, "story generation failed"),
        }
        let result = GenerationResult::from(outcome);
        guard.settle(result.clone());
        Ok(result)
    }
}
