use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use llm::LLMClient;
use tokio::sync::watch;
use tracing::debug;

use crate::conversation::{Transcript, Turn};
use crate::error::SessionError;
use crate::generation::{GenerationResult, StoryGenerator};
use crate::script::ConversationScript;

/// One interview: the transcript, the draft being typed, and the story.
///
/// All methods take `&self`, so a session can be shared behind an [`Arc`]
/// between request handlers. Locks are never held across an await.
pub struct Session {
    script: ConversationScript,
    transcript: Mutex<Transcript>,
    draft: Mutex<String>,
    generator: StoryGenerator,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Session {
    /// Start a session with the default script.
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self::with_generator(ConversationScript::default(), StoryGenerator::new(client))
    }

    pub fn with_script(client: Arc<dyn LLMClient>, script: ConversationScript) -> Self {
        Self::with_generator(script, StoryGenerator::new(client))
    }

    pub fn with_generator(script: ConversationScript, generator: StoryGenerator) -> Self {
        Self {
            transcript: Mutex::new(Transcript::new(script.greeting.clone())),
            draft: Mutex::new(String::new()),
            script,
            generator,
        }
    }

    pub fn script(&self) -> &ConversationScript {
        &self.script
    }

    /// Snapshot of every turn so far, in order.
    pub fn transcript(&self) -> Vec<Turn> {
        lock(&self.transcript).turns().to_vec()
    }

    /// Record the person's message and the interviewer's follow-up.
    ///
    /// Blank text is ignored. The draft buffer is cleared when the message is
    /// accepted.
    pub fn submit(&self, text: &str) {
        let accepted = lock(&self.transcript).answer(text, &self.script.follow_up);
        if accepted {
            lock(&self.draft).clear();
            debug!(chars = text.chars().count(), "memory submitted");
        }
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        *lock(&self.draft) = text.into();
    }

    pub fn draft(&self) -> String {
        lock(&self.draft).clone()
    }

    /// Submit whatever is in the draft buffer.
    pub fn submit_draft(&self) {
        let text = self.draft();
        self.submit(&text);
    }

    /// Turn the transcript into a story.
    ///
    /// Refused until the person has shared something, and while another
    /// generation is pending.
    pub async fn generate(&self) -> Result<GenerationResult, SessionError> {
        let turns = {
            let transcript = lock(&self.transcript);
            if !transcript.has_responder() {
                return Err(SessionError::NothingToTell);
            }
            transcript.turns().to_vec()
        };
        self.generator.generate(&turns).await
    }

    pub fn current_result(&self) -> GenerationResult {
        self.generator.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<GenerationResult> {
        self.generator.subscribe()
    }
}
