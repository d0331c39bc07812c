use regex::{Regex, RegexBuilder};
use std::collections::HashSet;

/// Case-insensitive alternation over `tokens`, longest first. Blank and
/// repeated tokens are dropped; `None` when nothing remains.
pub fn build_keyword_regex<S: AsRef<str>>(tokens: &[S]) -> Option<Regex> {
    let mut unique = Vec::new();
    let mut seen = HashSet::new();
    for token in tokens {
        let token = token.as_ref().trim();
        if token.is_empty() {
            continue;
        }
        if seen.insert(token.to_lowercase()) {
            unique.push(token);
        }
    }
    if unique.is_empty() {
        return None;
    }
    unique.sort_by(|a, b| b.len().cmp(&a.len()));
    let pattern = unique
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(regex) => Some(regex),
        Err(err) => {
            tracing::warn!(%err, "ignoring standout keywords that failed to compile");
            None
        }
    }
}
