//! Prompt building for story generation.
//!
//! The transcript is rendered one line per turn and dropped into a fixed
//! biographer template. Rendering is pure: the same turns always produce the
//! same prompt.

use crate::conversation::Turn;

/// Instructions sent to the language model, with a `{conversation}` slot.
pub const STORY_TEMPLATE: &str = include_str!("story_prompt.txt");

const CONVERSATION_SLOT: &str = "{conversation}";

/// Common interface for constructing prompts from a transcript.
pub trait PromptFragment {
    fn build_prompt(&self, turns: &[Turn]) -> String;
}

/// Render turns as `"<Label>: <text>"` lines joined by newlines.
pub fn render_turns(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.speaker.label(), t.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt asking for a short first-person story told in the person's voice.
#[derive(Clone, Debug)]
pub struct StoryPrompt {
    template: String,
}

impl Default for StoryPrompt {
    fn default() -> Self {
        Self {
            template: STORY_TEMPLATE.to_string(),
        }
    }
}

impl StoryPrompt {
    /// Use a custom template. Every `{conversation}` in it is replaced with
    /// the rendered transcript.
    pub fn with_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn format(&self, turns: &[Turn]) -> String {
        self.template.replace(CONVERSATION_SLOT, &render_turns(turns))
    }
}

impl PromptFragment for StoryPrompt {
    fn build_prompt(&self, turns: &[Turn]) -> String {
        self.format(turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_labels_not_role_names() {
        let turns = [Turn::asker("Hi"), Turn::responder("I fished")];
        assert_eq!(render_turns(&turns), "Interviewer: Hi\nPerson: I fished");
    }

    #[test]
    fn slot_in_user_text_is_not_expanded() {
        let turns = [Turn::responder("{conversation}")];
        let p = StoryPrompt::with_template("<{conversation}>").format(&turns);
        assert_eq!(p, "<Person: {conversation}>");
    }
}
