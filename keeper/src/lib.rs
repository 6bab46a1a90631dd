//! Interview a person about their memories and turn the answers into a story.
//!
//! A [`Session`] keeps the [`Transcript`] of a scripted interview, answers
//! each submission with the [`ConversationScript`]'s follow-up, and on request
//! hands the whole transcript to an [`llm::LLMClient`] through the
//! single-flight [`StoryGenerator`].

pub mod conversation;
pub mod error;
pub mod generation;
pub mod prompt;
pub mod script;
pub mod session;

pub use conversation::{Role, Transcript, Turn};
pub use error::{ScriptError, SessionError, StoryError};
pub use generation::{GenerationResult, StoryGenerator, DEFAULT_TIMEOUT, INTERRUPTED_MESSAGE};
pub use prompt::{render_turns, PromptFragment, StoryPrompt, STORY_TEMPLATE};
pub use script::{ConversationScript, DEFAULT_FOLLOW_UP, DEFAULT_GREETING};
pub use session::Session;
