//! The response orchestrator.
//!
//! [`Responder`] owns an immutable rule set and knowledge base and turns a
//! conversation history into exactly one reply:
//!
//! 1. Find the most recent user message. None (or an empty one) → [`IDLE_REPLY`].
//! 2. First matching heuristic rule → its template.
//! 3. Otherwise the knowledge base picks and renders an entry.
//!
//! `respond` is pure: identical histories always produce identical replies.

use agentic_chat_core::{ChatMessage, Result};
use tracing::debug;

use crate::catalog::builtin_catalog;
use crate::heuristics::HeuristicRuleSet;
use crate::knowledge::KnowledgeBase;

/// Reply when there is nothing to answer yet.
pub const IDLE_REPLY: &str = "I'm here and ready whenever you are.";

/// Which path produced a reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// No user prompt in the history.
    Idle,
    /// A heuristic rule fired.
    Heuristic { rule: &'static str },
    /// A knowledge entry was selected (possibly `default`).
    Knowledge { entry: String, score: f64 },
}

/// A rendered reply together with the route that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub route: Route,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Responder {
    heuristics: HeuristicRuleSet,
    knowledge: KnowledgeBase,
}

impl Responder {
    /// Assemble a responder from an explicit rule set and catalog.
    pub fn new(heuristics: HeuristicRuleSet, knowledge: KnowledgeBase) -> Self {
        Self {
            heuristics,
            knowledge,
        }
    }

    /// The stock rules and catalog.
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(
            HeuristicRuleSet::standard()?,
            KnowledgeBase::new(builtin_catalog())?,
        ))
    }

    pub fn heuristics(&self) -> &HeuristicRuleSet {
        &self.heuristics
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Produce the reply text for `history`.
    pub fn respond(&self, history: &[ChatMessage]) -> String {
        self.reply(history).text
    }

    /// Produce the reply along with the route that was taken.
    pub fn reply(&self, history: &[ChatMessage]) -> Reply {
        let Some(prompt) = latest_prompt(history) else {
            debug!(route = "idle", turns = history.len(), "No user prompt to answer");
            return Reply {
                route: Route::Idle,
                text: IDLE_REPLY.to_string(),
            };
        };

        if let Some(rule) = self.heuristics.first_match(prompt) {
            debug!(route = "heuristic", rule = rule.name(), "Heuristic matched");
            return Reply {
                route: Route::Heuristic { rule: rule.name() },
                text: rule.render(prompt),
            };
        }

        let selected = self.knowledge.select(prompt);
        debug!(
            route = "knowledge",
            entry = %selected.entry.id,
            score = selected.score,
            "Knowledge entry selected"
        );
        Reply {
            route: Route::Knowledge {
                entry: selected.entry.id.clone(),
                score: selected.score,
            },
            text: selected.entry.render(prompt, history),
        }
    }
}

/// Content of the most recent user message, unless it is empty.
pub fn latest_prompt(history: &[ChatMessage]) -> Option<&str> {
    history
        .iter()
        .rev()
        .find(|message| message.is_user())
        .map(|message| message.content.as_str())
        .filter(|content| !content.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::{GREETING_REPLY, HeuristicRule};
    use crate::knowledge::{DEFAULT_ENTRY_ID, KnowledgeEntry, Template};

    fn responder() -> Responder {
        Responder::builtin().unwrap()
    }

    fn ask(prompt: &str) -> Reply {
        responder().reply(&[ChatMessage::user(prompt)])
    }

    #[test]
    fn responder_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Responder>();
    }

    #[test]
    fn empty_history_is_idle() {
        assert_eq!(responder().respond(&[]), IDLE_REPLY);
    }

    #[test]
    fn history_without_user_turns_is_idle() {
        let history = vec![
            ChatMessage::system("You are helpful"),
            ChatMessage::assistant("Welcome! explain plan code"),
        ];
        let reply = responder().reply(&history);
        assert_eq!(reply.route, Route::Idle);
        assert_eq!(reply.text, IDLE_REPLY);
    }

    #[test]
    fn empty_latest_prompt_is_idle() {
        let history = vec![ChatMessage::user("hello"), ChatMessage::user("")];
        assert_eq!(responder().respond(&history), IDLE_REPLY);
    }

    #[test]
    fn latest_user_turn_is_the_prompt() {
        let history = vec![
            ChatMessage::user("hello"),
            ChatMessage::user("qwertyuiop"),
            ChatMessage::assistant("hello again"),
        ];
        assert_eq!(latest_prompt(&history), Some("qwertyuiop"));
    }

    #[test]
    fn hello_gets_greeting() {
        let reply = ask("hello");
        assert_eq!(reply.route, Route::Heuristic { rule: "greeting" });
        assert!(reply.text.starts_with("Hi there!"));
    }

    #[test]
    fn greeting_outranks_explanation() {
        let reply = ask("hi, can you explain recursion");
        assert_eq!(reply.text, GREETING_REPLY);
    }

    #[test]
    fn explanation_outranks_plan() {
        let reply = ask("explain the roadmap");
        assert_eq!(reply.route, Route::Heuristic { rule: "explain" });
        assert!(reply.text.contains("Concept** – explain the roadmap"));
    }

    #[test]
    fn plan_request_gets_plan_template() {
        let prompt = "Help me plan a product launch roadmap";
        let reply = ask(prompt);
        assert_eq!(reply.route, Route::Heuristic { rule: "plan" });
        assert!(reply.text.contains("Context** –"));
        assert!(reply.text.contains(prompt));
    }

    #[test]
    fn heuristics_preempt_knowledge_scoring() {
        // Would score high for code-help, but the explain rule fires first.
        let reply = ask("what is a react component bug");
        assert_eq!(reply.route, Route::Heuristic { rule: "explain" });
        assert!(!reply.text.contains("```ts"));
    }

    #[test]
    fn react_bug_routes_to_code_help() {
        let reply = ask("I have a bug in my React component");
        assert_eq!(
            reply.route,
            Route::Knowledge {
                entry: "code-help".into(),
                score: 4.25
            }
        );
        assert!(reply.text.contains("1. **Reframe the problem**"));
        assert!(reply.text.contains("```ts"));
    }

    #[test]
    fn gibberish_falls_back_without_lead_in() {
        let reply = ask("qwertyuiop zzz");
        assert_eq!(
            reply.route,
            Route::Knowledge {
                entry: DEFAULT_ENTRY_ID.into(),
                score: 0.0
            }
        );
        assert!(reply.text.starts_with("Here’s how we can move forward:"));
        assert!(!reply.text.contains("From what we've covered"));
    }

    #[test]
    fn fallback_mentions_earlier_writing() {
        let history = vec![
            ChatMessage::user("let's write a blog post"),
            ChatMessage::assistant("..."),
            ChatMessage::user("qwertyuiop"),
        ];
        let reply = responder().respond(&history);
        assert!(reply.starts_with("_From what we've covered:"));
        assert!(reply.contains("refining some writing"));
        assert!(reply.contains("Here’s how we can move forward:"));
    }

    #[test]
    fn responses_are_deterministic() {
        let responder = responder();
        let history = vec![
            ChatMessage::user("our product code"),
            ChatMessage::assistant("ok"),
            ChatMessage::user("market launch feature"),
        ];
        assert_eq!(responder.respond(&history), responder.respond(&history));
        assert_eq!(responder.reply(&history), responder.reply(&history));
    }

    #[test]
    fn alternate_catalog_is_honoured() {
        fn shout(prompt: &str) -> String {
            prompt.to_uppercase()
        }

        let rules = HeuristicRuleSet::new(vec![HeuristicRule::new("shout", "^!", shout).unwrap()]);
        let knowledge = KnowledgeBase::new(vec![
            KnowledgeEntry::new("rust", "", &["borrow checker"], Template::fixed("Ownership!")),
            KnowledgeEntry::new(DEFAULT_ENTRY_ID, "", &[], Template::fixed("Say more.")),
        ])
        .unwrap();
        let responder = Responder::new(rules, knowledge);

        assert_eq!(responder.respond(&[ChatMessage::user("!quiet")]), "!QUIET");
        assert_eq!(
            responder.respond(&[ChatMessage::user("the borrow checker hates me")]),
            "Ownership!"
        );
        assert_eq!(responder.respond(&[ChatMessage::user("hello")]), "Say more.");
    }
}
