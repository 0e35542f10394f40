//! Conversation starters shown to new users.

use serde::Serialize;

/// Opening assistant message for a fresh conversation.
pub const WELCOME_MESSAGE: &str = "Welcome to Agentic Chat. Drop a challenge, and I’ll help you unpack it with structure, clarity, and momentum.";

/// A canned prompt a front-end can offer as a one-click starter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PromptSuggestion {
    pub title: &'static str,
    pub prompt: &'static str,
}

pub const PROMPT_SUGGESTIONS: &[PromptSuggestion] = &[
    PromptSuggestion {
        title: "Plan a product launch",
        prompt: "Help me outline a product launch plan for a productivity app targeting remote teams.",
    },
    PromptSuggestion {
        title: "Refine my code",
        prompt: "Review this React component and suggest improvements for accessibility and state management.",
    },
    PromptSuggestion {
        title: "Rework my copy",
        prompt: "Rewrite this landing page hero copy with a confident, friendly tone that highlights a new AI feature.",
    },
    PromptSuggestion {
        title: "Unlock momentum",
        prompt: "Help me break down a complex technical project into milestones and quick wins.",
    },
];
