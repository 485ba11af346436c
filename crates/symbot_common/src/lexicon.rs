//! Static word tables shared by the trigger classifier and the query filter.

use std::collections::HashSet;

/// Phrases that route a turn to the encyclopedia when they open the input.
/// Order is preserved; single-word entries are also stripped from queries.
pub const DEFAULT_TRIGGERS: &[&str] = &[
    "what",
    "who",
    "who is",
    "what is",
    "when is",
    "where",
    "where is",
    "how",
    "how to",
    "tell me",
    "what happened",
    "what are",
    "who are",
    "who wrote",
    "who created",
    "who made",
    "how many",
    "when",
    "when did",
    "why",
    "explain",
    "describe",
];

/// Stop-words removed from encyclopedia queries
pub const DEFAULT_EXCLUDED_WORDS: &[&str] = &[
    "a", "an", "the", "this", "then", "their", "when", "we", "who", "what", "why", "and", "if",
    "that", "where", "with", "you", "your", "about", "tell", "me", "had", "have", "not", "occur",
    "occurred", "history", "historical", "past", "present", "future", "current", "new", "news",
    "old", "newer", "older", "oldest", "newest", "year", "years", "how", "has", "too", "to", "top",
    "won", "win", "wins", "show", "is", "wrote", "written", "made", "makes", "movie", "song",
    "sings", "title", "art", "artwork", "drew", "drawn", "tv", "podcast", "do", "does", "are",
    "did", "don't", "didn't", "on", "off", "he", "she", "it", "they", "his", "her", "its", "was",
    "were", "be", "been",
];

/// Trigger table plus excluded-word set, built once at start-up
#[derive(Debug, Clone)]
pub struct Lexicon {
    triggers: Vec<String>,
    excluded: HashSet<String>,
}

impl Lexicon {
    pub fn new<T, E>(triggers: T, excluded: E) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Self {
            triggers: triggers
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            excluded: excluded
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Ordered trigger phrases
    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    /// True if a single token must be dropped from a query
    pub fn is_filtered_word(&self, word: &str) -> bool {
        self.excluded.contains(word) || self.triggers.iter().any(|t| t == word)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(DEFAULT_TRIGGERS, DEFAULT_EXCLUDED_WORDS)
    }
}
