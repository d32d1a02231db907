//! Input normalization
//!
//! Free text from the landing screen is cleaned once here and then used both
//! for keyword matching and for embedding in provider prompts.

use serde::{Deserialize, Serialize};

/// Maximum length for the primary routing path
pub const MAX_ROUTING_LEN: usize = 500;

/// Maximum length for ambient-text context (whisper mood, etc.)
pub const MAX_AMBIENT_LEN: usize = 200;

/// Characters removed before text can reach a prompt
const STRIPPED: &[char] = &['<', '>', '{', '}', '[', ']'];

/// Sanitize raw input.
///
/// Strips `< > { } [ ]`, turns newlines and other control characters into
/// spaces, collapses whitespace runs, trims, and truncates to `max_len`
/// characters. Over-long input is truncated, never rejected.
pub fn sanitize_input(raw: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(raw.len().min(max_len * 4));
    let mut pending_space = false;

    for c in raw.chars() {
        if STRIPPED.contains(&c) {
            continue;
        }
        if c.is_whitespace() || c.is_control() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }

    if out.chars().count() > max_len {
        out = out.chars().take(max_len).collect();
        let trimmed_len = out.trim_end().len();
        out.truncate(trimmed_len);
    }

    out
}

/// Number of whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Sanitized input ready for classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedInput {
    /// Original input
    pub original: String,

    /// Sanitized text, safe to embed in a prompt
    pub text: String,

    /// Lowercase sanitized text for matching
    pub lower: String,

    /// Word count of the sanitized text
    pub word_count: usize,
}

impl NormalizedInput {
    /// Normalize input for the primary routing path
    pub fn new(raw: &str) -> Self {
        Self::with_limit(raw, MAX_ROUTING_LEN)
    }

    pub fn with_limit(raw: &str, max_len: usize) -> Self {
        let text = sanitize_input(raw, max_len);
        let lower = text.to_lowercase();
        let word_count = word_count(&text);

        Self {
            original: raw.to_string(),
            text,
            lower,
            word_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    pub fn is_single_word(&self) -> bool {
        self.word_count == 1
    }
}
