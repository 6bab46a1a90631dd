use serde::{Deserialize, Serialize};

/// Who spoke a [`Turn`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The scripted interviewer.
    Asker,
    /// The person whose memory is being recorded.
    Responder,
}

impl Role {
    /// Label used when the transcript is rendered for the story prompt.
    pub fn label(self) -> &'static str {
        match self {
            Role::Asker => "Interviewer",
            Role::Responder => "Person",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Role,
    pub text: String,
}

impl Turn {
    pub fn asker(text: impl Into<String>) -> Self {
        Self {
            speaker: Role::Asker,
            text: text.into(),
        }
    }

    pub fn responder(text: impl Into<String>) -> Self {
        Self {
            speaker: Role::Responder,
            text: text.into(),
        }
    }
}

/// Append-only history of one interview, opened by an interviewer turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Start a transcript seeded with the interviewer's opening line.
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::asker(greeting)],
        }
    }

    /// Append a single turn. Alternation of speakers is not enforced.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Record the person's answer followed by the interviewer's follow-up.
    ///
    /// Blank answers are ignored; returns whether anything was appended.
    pub fn answer(&mut self, text: &str, follow_up: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.push(Turn::responder(text));
        self.push(Turn::asker(follow_up));
        true
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Whether the person has said anything yet.
    pub fn has_responder(&self) -> bool {
        self.turns.iter().any(|t| t.speaker == Role::Responder)
    }
}
