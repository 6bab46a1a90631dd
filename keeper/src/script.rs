//! The interviewer's scripted lines.
//!
//! The interview is not generated: it opens with a fixed greeting and answers
//! every submission with the same follow-up. Both lines are plain data so the
//! script can be swapped without touching the session logic.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScriptError;

pub const DEFAULT_GREETING: &str = "Hello! Please tell me a memory you would like to save.";
pub const DEFAULT_FOLLOW_UP: &str =
    "That memory is interesting! Can you tell me more, or share another memory?";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationScript {
    /// Opening interviewer turn that seeds every transcript.
    pub greeting: String,
    /// Interviewer turn appended after each accepted submission.
    pub follow_up: String,
}

impl Default for ConversationScript {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.into(),
            follow_up: DEFAULT_FOLLOW_UP.into(),
        }
    }
}

impl ConversationScript {
    /// Parse a script from JSON. Missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        let script: Self = serde_json::from_str(json)?;
        script.validate()
    }

    /// Read a JSON script from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    fn validate(self) -> Result<Self, ScriptError> {
        if self.greeting.trim().is_empty() {
            return Err(ScriptError::Blank("greeting"));
        }
        if self.follow_up.trim().is_empty() {
            return Err(ScriptError::Blank("follow_up"));
        }
        Ok(self)
    }
}
