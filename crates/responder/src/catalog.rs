//! The built-in knowledge catalog.
//!
//! Declaration order doubles as the tie-break when two entries score the
//! same, so new entries go before `default` and after anything they should
//! lose ties to.

use agentic_chat_core::ChatMessage;

use crate::knowledge::{DEFAULT_ENTRY_ID, KnowledgeEntry, Template};
use crate::normalizer::summarize;
use crate::synthesizer::synthesize_context;

const INTRO_REPLY: &str = "Hello! I’m Agentic Chat, a conversational assistant modeled after ChatGPT. I can help you explore ideas, break down problems, sketch product plans, or brainstorm content. Just let me know what you’d like to accomplish.";

const PRODUCT_REPLY: &[&str] = &[
    "Let's structure this idea so you can move quickly:",
    "",
    "- **North Star** – Clarify the outcome you want a user to achieve.",
    "- **User Segments** – Define primary users, their motivations, and current workaround.",
    "- **Experience Slice** – Identify the smallest valuable workflow you can ship.",
    "- **Instrumentation** – Decide how you’ll measure adoption and success.",
    "",
    "Once you outline these, we can dig into messaging, activation loops, and technical scope.",
];

const WRITING_REPLY: &[&str] = &[
    "Let's shape your writing with a clear template:",
    "",
    "1. **Audience & intent** – spell out who you’re speaking to and the outcome you want.",
    "2. **Core message** – reduce it to a single, memorable sentence.",
    "3. **Structure** – Outline an engaging hook, supporting arguments, and call-to-action.",
    "4. **Voice** – Choose 2–3 adjectives (e.g. warm, practical, bold) to anchor the tone.",
    "",
    "Share any draft fragments and we’ll iterate together.",
];

const FALLBACK_BODY: &[&str] = &[
    "Here’s how we can move forward:",
    "- Clarify what success looks like or share constraints.",
    "- Break the problem into smaller, verifiable steps.",
    "- Prioritize the next experiment so we can learn quickly.",
    "Drop more details and I’ll help fill in the gaps.",
];

/// Build the stock catalog: `intro`, `code-help`, `product`, `writing`, `default`.
pub fn builtin_catalog() -> Vec<KnowledgeEntry> {
    vec![
        KnowledgeEntry::new(
            "intro",
            "Greeting and high level overview",
            &["hello", "hi", "hey", "who", "what", "are you", "introduce"],
            Template::fixed(INTRO_REPLY),
        ),
        KnowledgeEntry::new(
            "code-help",
            "Explain coding problems or generate snippets",
            &[
                "code",
                "bug",
                "error",
                "typescript",
                "javascript",
                "react",
                "component",
                "function",
                "algorithm",
                "regex",
                "next.js",
            ],
            Template::Rendered(render_code_help),
        ),
        KnowledgeEntry::new(
            "product",
            "Product ideation or strategy",
            &[
                "roadmap", "product", "market", "business", "strategy", "launch", "feature",
            ],
            Template::fixed(PRODUCT_REPLY.join("\n")),
        ),
        KnowledgeEntry::new(
            "writing",
            "Content creation guidance",
            &[
                "write", "blog", "article", "essay", "story", "copy", "email", "tone", "style",
            ],
            Template::fixed(WRITING_REPLY.join("\n")),
        ),
        KnowledgeEntry::new(
            DEFAULT_ENTRY_ID,
            "Fallback response",
            &[],
            Template::Rendered(render_fallback),
        ),
    ]
}

fn render_code_help(prompt: &str, _history: &[ChatMessage]) -> String {
    [
        "Here's a breakdown you can follow:".to_string(),
        String::new(),
        format!("1. **Reframe the problem** – {}.", summarize(prompt.trim())),
        "2. **Steps to implement**".to_string(),
        "   - Identify the core data structures you need.".to_string(),
        "   - Map out the component or function signature.".to_string(),
        "   - Validate edge-cases before wiring it into the UI.".to_string(),
        "3. **Example scaffold**".to_string(),
        "```ts".to_string(),
        "export function solve(input: InputType): OutputType {".to_string(),
        "  // 1. Guard clauses for invalid state".to_string(),
        "  // 2. Perform core transformation".to_string(),
        "  // 3. Return the result in a predictable shape".to_string(),
        "}".to_string(),
        "```".to_string(),
        String::new(),
        "Feel free to share the exact error message or file, and I’ll get more specific."
            .to_string(),
    ]
    .join("\n")
}

/// Generic fallback, prefaced by an italic lead-in when earlier turns exist.
fn render_fallback(_prompt: &str, history: &[ChatMessage]) -> String {
    let insight = synthesize_context(history);
    let mut lines = Vec::with_capacity(FALLBACK_BODY.len() + 1);
    if !insight.is_empty() {
        lines.push(format!("_From what we've covered: {insight}_"));
    }
    lines.extend(FALLBACK_BODY.iter().map(|line| line.to_string()));
    lines.join("\n")
}
