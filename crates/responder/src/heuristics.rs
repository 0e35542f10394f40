//! Fast-path heuristic rules.
//!
//! Rules are evaluated in declaration order against the raw prompt and the
//! first match renders the final reply. Order is priority: a prompt such as
//! "hi, can you explain recursion" is a greeting, not an explanation request.
//!
//! | # | Rule | Match |
//! |---|------|-------|
//! | 1 | `greeting` | prompt *starts* with the word hi / hello / hey |
//! | 2 | `explain` | prompt *contains* explain / how does / what is |
//! | 3 | `plan` | prompt contains the *whole word* plan / roadmap / strategy |
//!
//! All matching is ASCII case-insensitive.

use agentic_chat_core::{Error, Result};
use regex_lite::Regex;

use crate::normalizer::summarize;

/// Renders a reply from the prompt that matched.
pub type HeuristicRender = fn(&str) -> String;

const GREETING_PATTERN: &str = r"(?i)^\s*(?:hi|hello|hey)\b";
const EXPLAIN_PATTERN: &str = r"(?i)explain|how does|what is";
const PLAN_PATTERN: &str = r"(?i)\b(?:plan|roadmap|strategy)\b";

pub const GREETING_REPLY: &str = "Hi there! What should we explore together today? I can help with code, product strategy, writing, or brainstorming new directions.";

/// A pattern paired with the template it triggers.
#[derive(Debug, Clone)]
pub struct HeuristicRule {
    name: &'static str,
    pattern: Regex,
    render: HeuristicRender,
}

impl HeuristicRule {
    /// Compile a rule. An invalid pattern is a configuration error.
    pub fn new(name: &'static str, pattern: &str, render: HeuristicRender) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            Error::config(format!("heuristic '{name}' has an invalid pattern: {e}"))
        })?;
        Ok(Self {
            name,
            pattern,
            render,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn matches(&self, prompt: &str) -> bool {
        self.pattern.is_match(prompt)
    }

    pub fn render(&self, prompt: &str) -> String {
        (self.render)(prompt)
    }
}

/// An ordered list of heuristic rules; first match wins.
#[derive(Debug, Clone, Default)]
pub struct HeuristicRuleSet {
    rules: Vec<HeuristicRule>,
}

impl HeuristicRuleSet {
    pub fn new(rules: Vec<HeuristicRule>) -> Self {
        Self { rules }
    }

    /// The built-in greeting → explain → plan rules.
    pub fn standard() -> Result<Self> {
        Ok(Self::new(vec![
            HeuristicRule::new("greeting", GREETING_PATTERN, render_greeting)?,
            HeuristicRule::new("explain", EXPLAIN_PATTERN, render_explanation)?,
            HeuristicRule::new("plan", PLAN_PATTERN, render_plan)?,
        ]))
    }

    /// The first rule whose pattern matches `prompt`.
    pub fn first_match(&self, prompt: &str) -> Option<&HeuristicRule> {
        self.rules.iter().find(|rule| rule.matches(prompt))
    }

    pub fn rules(&self) -> &[HeuristicRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ── Templates ─────────────────────────────────────────────────────────────

fn render_greeting(_prompt: &str) -> String {
    GREETING_REPLY.to_string()
}

fn render_explanation(prompt: &str) -> String {
    [
        "Let’s break that down:".to_string(),
        String::new(),
        format!("- **Concept** – {}", summarize(prompt.trim())),
        "- **Mechanics** – Think about inputs, transformations, and outputs.".to_string(),
        "- **Next step** – Identify an example or edge-case to validate your understanding."
            .to_string(),
    ]
    .join("\n")
}

fn render_plan(prompt: &str) -> String {
    [
        "Here’s a lightweight plan you can adapt:".to_string(),
        String::new(),
        format!("- **Context** – {}.", summarize(prompt.trim())),
        "- **Milestones** – Organize work into momentum-building releases.".to_string(),
        "- **Risks** – Call out what could block progress and how to de-risk early.".to_string(),
        "- **Signals** – Define metrics or qualitative cues that tell you it’s working."
            .to_string(),
        String::new(),
        "Want a deeper dive on any section?".to_string(),
    ]
    .join("\n")
}
