//! The response engine — the heart of Agentic Chat.
//!
//! Every reply is chosen by a fixed pipeline over the conversation history:
//!
//! 1. **Extract** the most recent user turn (the prompt)
//! 2. **Heuristics**: ordered pattern rules; the first match renders the reply
//! 3. **Knowledge base**: keyword-weighted scoring over topical entries
//! 4. **Fallback**: the `default` entry, prefaced by a context synthesis
//!    of earlier user turns
//!
//! Nothing here performs I/O or keeps state between calls. A [`Responder`]
//! is built once and shared freely across threads.

pub mod catalog;
pub mod heuristics;
pub mod knowledge;
pub mod normalizer;
pub mod responder;
pub mod suggestions;
pub mod synthesizer;

pub use heuristics::{HeuristicRule, HeuristicRuleSet};
pub use knowledge::{
    DEFAULT_ENTRY_ID, FALLBACK_THRESHOLD, KnowledgeBase, KnowledgeEntry, ScoredEntry, Template,
};
pub use normalizer::summarize;
pub use responder::{IDLE_REPLY, Reply, Responder, Route};
pub use suggestions::{PROMPT_SUGGESTIONS, PromptSuggestion, WELCOME_MESSAGE};
pub use synthesizer::{Theme, synthesize_context};
