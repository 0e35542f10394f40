//! Keyword-weighted knowledge base.
//!
//! Each [`KnowledgeEntry`] is a topical bucket with a keyword set and a
//! [`Template`]. When no heuristic fires, every entry except `default` is
//! scored against the prompt and the best one above [`FALLBACK_THRESHOLD`]
//! renders the reply. Otherwise `default` does.
//!
//! # Scoring
//!
//! A keyword contributes `min(3, len / 4)` when it occurs anywhere in the
//! lower-cased prompt. Presence counts, frequency does not. Entries with
//! equal scores keep their catalog declaration order.

use std::collections::HashSet;

use agentic_chat_core::{ChatMessage, Error, Result};

use crate::normalizer::fold_case;

/// Identifier of the fallback entry every catalog must contain.
pub const DEFAULT_ENTRY_ID: &str = "default";

/// Minimum score the best candidate needs to beat the fallback.
pub const FALLBACK_THRESHOLD: f64 = 2.0;

/// Upper bound on the weight of a single keyword.
const MAX_KEYWORD_WEIGHT: f64 = 3.0;

/// Renders a reply from the prompt and the full history.
pub type RenderFn = fn(&str, &[ChatMessage]) -> String;

/// How an entry produces its reply.
#[derive(Debug, Clone)]
pub enum Template {
    /// Returned verbatim.
    Fixed(String),
    /// Computed from the prompt and history.
    Rendered(RenderFn),
}

impl Template {
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::Fixed(text.into())
    }

    pub fn render(&self, prompt: &str, history: &[ChatMessage]) -> String {
        match self {
            Template::Fixed(text) => text.clone(),
            Template::Rendered(render) => render(prompt, history),
        }
    }
}

/// A named topical bucket.
#[derive(Debug, Clone)]
pub struct KnowledgeEntry {
    /// Unique identifier
    pub id: String,

    /// Documentation only; never rendered
    pub description: String,

    /// Lowercase keywords matched as substrings of the prompt
    pub keywords: Vec<String>,

    /// The reply template
    pub response: Template,
}

impl KnowledgeEntry {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        keywords: &[&str],
        response: Template,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            response,
        }
    }

    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_ENTRY_ID
    }

    pub fn render(&self, prompt: &str, history: &[ChatMessage]) -> String {
        self.response.render(prompt, history)
    }
}

/// An entry paired with its score for one prompt.
#[derive(Debug, Clone, Copy)]
pub struct ScoredEntry<'a> {
    pub entry: &'a KnowledgeEntry,
    pub score: f64,
}

/// Weight contributed by a keyword that is present in the prompt.
pub fn keyword_weight(keyword: &str) -> f64 {
    (keyword.chars().count() as f64 / 4.0).min(MAX_KEYWORD_WEIGHT)
}

/// Score `entry` against `prompt`. Entries without keywords score 0.
pub fn score(prompt: &str, entry: &KnowledgeEntry) -> f64 {
    score_folded(&fold_case(prompt), entry)
}

fn score_folded(folded_prompt: &str, entry: &KnowledgeEntry) -> f64 {
    entry
        .keywords
        .iter()
        .filter(|keyword| folded_prompt.contains(keyword.as_str()))
        .fold(0.0, |total, keyword| total + keyword_weight(keyword))
}

/// A validated, immutable catalog of knowledge entries.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
    default_index: usize,
}

impl KnowledgeBase {
    /// Validate and build a catalog.
    ///
    /// Fails with [`Error::Config`] unless there is exactly one `default`
    /// entry with no keywords, every other entry has at least one keyword,
    /// ids are unique and keywords are lowercase.
    pub fn new(entries: Vec<KnowledgeEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut default_index = None;

        for (index, entry) in entries.iter().enumerate() {
            if !seen.insert(entry.id.as_str()) {
                return Err(Error::config(format!(
                    "duplicate knowledge entry id '{}'",
                    entry.id
                )));
            }

            if entry.is_default() {
                if !entry.keywords.is_empty() {
                    return Err(Error::config(
                        "the 'default' knowledge entry must not have keywords",
                    ));
                }
                default_index = Some(index);
                continue;
            }

            if entry.keywords.is_empty() {
                return Err(Error::config(format!(
                    "knowledge entry '{}' has no keywords",
                    entry.id
                )));
            }

            if let Some(keyword) = entry.keywords.iter().find(|k| fold_case(k) != **k) {
                return Err(Error::config(format!(
                    "knowledge entry '{}' has non-lowercase keyword '{keyword}'",
                    entry.id
                )));
            }
        }

        let default_index = default_index.ok_or_else(|| {
            Error::config(format!(
                "knowledge catalog has no '{DEFAULT_ENTRY_ID}' entry"
            ))
        })?;

        Ok(Self {
            entries,
            default_index,
        })
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&KnowledgeEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn default_entry(&self) -> &KnowledgeEntry {
        &self.entries[self.default_index]
    }

    /// Score every non-default entry, best first. Ties keep catalog order.
    pub fn rank(&self, prompt: &str) -> Vec<ScoredEntry<'_>> {
        let folded = fold_case(prompt);
        let mut scored: Vec<ScoredEntry<'_>> = self
            .entries
            .iter()
            .filter(|entry| !entry.is_default())
            .map(|entry| ScoredEntry {
                entry,
                score: score_folded(&folded, entry),
            })
            .collect();

        // `sort_by` is stable, which is what makes the tie-break deterministic.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored
    }

    /// Pick the entry that answers `prompt`.
    ///
    /// Falls back to `default` (reported with score 0) when there are no
    /// candidates or the best one scores below [`FALLBACK_THRESHOLD`].
    pub fn select(&self, prompt: &str) -> ScoredEntry<'_> {
        match self.rank(prompt).into_iter().next() {
            Some(top) if top.score >= FALLBACK_THRESHOLD => top,
            _ => ScoredEntry {
                entry: self.default_entry(),
                score: 0.0,
            },
        }
    }

    /// Select an entry and render it with the full history.
    pub fn respond(&self, prompt: &str, history: &[ChatMessage]) -> String {
        self.select(prompt).entry.render(prompt, history)
    }
}
