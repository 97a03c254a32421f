//! Tokenizer — normalises raw resume / job-description text into keyword tokens.
//!
//! Rules, applied in order:
//! 1. lower-case the whole input
//! 2. every character that is not alphanumeric, `_`, `+`, `-` or `.` becomes a separator
//!    (so "c++" and "node.js" survive while "ci/cd" splits into "ci" and "cd")
//! 3. split on separators and trim sentence-final dots ("python." -> "python")
//! 4. drop tokens of 2 characters or fewer
//! 5. drop stop words

use std::collections::HashSet;

use crate::ats::keywords::is_stop_word;

const MIN_TOKEN_CHARS: usize = 3;

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '+' | '-' | '.')
}

/// Ordered token stream, duplicates kept. Total: empty input yields an empty vec.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_token_char(c))
        .map(|token| token.trim_end_matches('.'))
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Distinct tokens in first-seen order.
pub fn unique_tokens(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(text)
        .into_iter()
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

/// Membership structure for the resume side; order is irrelevant there.
pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}
