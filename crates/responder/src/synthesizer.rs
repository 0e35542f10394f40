//! Context synthesis for the fallback reply.
//!
//! Looks at the last few turns and names the themes of the earlier user
//! messages there, giving the generic fallback a thin sense of continuity.

use agentic_chat_core::ChatMessage;

use crate::normalizer::fold_case;

/// Number of trailing messages inspected.
pub const CONTEXT_WINDOW: usize = 4;

const CONNECTIVE: &str = " Also, ";

/// What a user turn appears to be about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Code,
    Product,
    Writing,
    Idea,
}

impl Theme {
    /// Classify a message body. Checks run in order: code, product, write.
    pub fn classify(content: &str) -> Self {
        let folded = fold_case(content);
        if folded.contains("code") {
            Theme::Code
        } else if folded.contains("product") {
            Theme::Product
        } else if folded.contains("write") {
            Theme::Writing
        } else {
            Theme::Idea
        }
    }

    pub fn phrase(self) -> &'static str {
        match self {
            Theme::Code => "you’re iterating on code.",
            Theme::Product => "you’re shaping a product concept.",
            Theme::Writing => "you’re refining some writing.",
            Theme::Idea => "you’re unpacking an idea.",
        }
    }
}

/// Summarize the themes of recent user turns.
///
/// Only the last [`CONTEXT_WINDOW`] messages are inspected. The newest user
/// turn in that window is the prompt being answered and is left out, so a
/// single-turn conversation yields an empty string. Phrases are deduplicated
/// in first-seen order.
pub fn synthesize_context(history: &[ChatMessage]) -> String {
    let window = &history[history.len().saturating_sub(CONTEXT_WINDOW)..];
    let mut earlier_turns: Vec<&ChatMessage> = window.iter().filter(|m| m.is_user()).collect();
    earlier_turns.pop();

    let mut themes: Vec<Theme> = Vec::with_capacity(earlier_turns.len());
    for message in earlier_turns {
        let theme = Theme::classify(&message.content);
        if !themes.contains(&theme) {
            themes.push(theme);
        }
    }

    themes
        .into_iter()
        .map(Theme::phrase)
        .collect::<Vec<_>>()
        .join(CONNECTIVE)
}
