use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

const STOP_WORDS: &[&str] = &["and", "the", "with", "for", "from", "that", "this", "have"];

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w{3,}\b").expect("Invalid keyword regex pattern"));

/// Lowercased words of three or more word characters, minus stop words.
/// Sorted so the dashboard shows them in a stable order.
pub fn extract_keywords(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|word| !STOP_WORDS.contains(word))
        .map(String::from)
        .collect()
}
