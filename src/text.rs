//! Term extraction shared by lexical scoring and the stub collaborators.

use std::collections::HashSet;
use std::sync::LazyLock;

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
        "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "shall",
        "can", "need", "to", "of", "in", "for", "on", "with", "at", "by", "from", "as", "into",
        "through", "during", "before", "after", "above", "below", "between", "under", "again",
        "further", "then", "once", "here", "there", "when", "where", "why", "how", "all", "each",
        "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same",
        "so", "than", "too", "very", "just", "and", "but", "if", "or", "because", "until",
        "while", "what", "which", "who", "whom", "this", "that", "these", "those", "am", "it",
        "its", "my", "me", "i", "they", "them", "their", "we", "us", "our", "you", "your",
    ]
    .into_iter()
    .collect()
});

/// Lowercased alphanumeric runs, in document order.
pub fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// Like [`terms`], minus stop words.
pub fn content_terms(text: &str) -> impl Iterator<Item = String> + '_ {
    terms(text).filter(|t| !is_stop_word(t))
}

pub fn is_stop_word(term: &str) -> bool {
    STOP_WORDS.contains(term)
}
