//! Text normalization helpers used when embedding prompts into templates.
//!
//! Lengths are measured in `char`s so truncation never splits a UTF-8
//! sequence.

/// Default maximum length of an embedded prompt summary.
pub const SUMMARY_MAX_LEN: usize = 140;

/// Characters reserved for the ellipsis when a summary is truncated.
const TRUNCATION_MARGIN: usize = 5;

const ELLIPSIS: char = '…';

/// Summarize `text` to at most [`SUMMARY_MAX_LEN`] characters.
pub fn summarize(text: &str) -> String {
    summarize_to(text, SUMMARY_MAX_LEN)
}

/// Summarize `text` to `max_len` characters.
///
/// Text longer than `max_len` keeps its first `max_len - 5` characters,
/// trimmed, followed by `…`. Shorter text is only trimmed.
pub fn summarize_to(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let head: String = text
            .chars()
            .take(max_len.saturating_sub(TRUNCATION_MARGIN))
            .collect();
        format!("{}{ELLIPSIS}", head.trim())
    } else {
        text.trim().to_string()
    }
}

/// Case-fold text for keyword and theme matching.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}
