//! Query filter - turns a user sentence into an encyclopedia search term.
//!
//! Quoted phrases are kept verbatim and placed first; the rest is
//! lower-cased, stripped of punctuation and of stop-words/trigger words.

use crate::lexicon::Lexicon;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

static QUOTED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)""#).expect("valid regex"));
static NON_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));
static SANITIZE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[^\w\s"]+"#).expect("valid regex"));
static MULTI_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// Build a search term from raw input. Blank input yields an empty string.
pub fn filter_query(input: &str, lexicon: &Lexicon) -> String {
    if input.trim().is_empty() {
        warn!("Blank input provided to query filter");
        return String::new();
    }

    let quoted: Vec<String> = QUOTED_RE
        .captures_iter(input)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|phrase| !phrase.is_empty())
        .collect();

    // Replace with a space so words on either side of a quote stay apart
    let remainder = QUOTED_RE.replace_all(input, " ").to_lowercase();
    let remainder = NON_WORD_RE.replace_all(&remainder, "");

    let words = remainder
        .split_whitespace()
        .filter(|word| !lexicon.is_filtered_word(word))
        .map(str::to_string);

    let query = quoted.into_iter().chain(words).collect::<Vec<_>>().join(" ");
    debug!("Filtered query: {:?} -> {:?}", input, query);
    query
}

/// Drop apostrophes and punctuation (double quotes survive) and squeeze
/// runs of whitespace.
pub fn sanitize_input(input: &str) -> String {
    let without_apostrophes = input.replace('\'', "");
    let cleaned = SANITIZE_RE.replace_all(&without_apostrophes, "");
    let squeezed = MULTI_SPACE_RE.replace_all(&cleaned, " ");
    debug!("Sanitized input: {:?}", squeezed);
    squeezed.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::default()
    }

    #[test]
    fn test_quoted_phrase_first() {
        assert_eq!(
            filter_query(r#""Ada Lovelace" tell me when she was born"#, &lexicon()),
            "Ada Lovelace born"
        );
    }

    #[test]
    fn test_trigger_and_stop_words_stripped() {
        assert_eq!(filter_query("Who is Ada Lovelace?", &lexicon()), "ada lovelace");
        assert_eq!(
            filter_query("explain the theory of relativity", &lexicon()),
            "theory of relativity"
        );
    }

    #[test]
    fn test_multiple_quotes_keep_order() {
        assert_eq!(
            filter_query(r#"compare "Rust" and "Go" languages"#, &lexicon()),
            "Rust Go compare languages"
        );
    }

    #[test]
    fn test_quote_does_not_fuse_words() {
        assert_eq!(filter_query(r#"alpha"x"beta"#, &lexicon()), "x alpha beta");
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(filter_query("", &lexicon()), "");
        assert_eq!(filter_query("   ", &lexicon()), "");
    }

    #[test]
    fn test_only_stop_words_yields_empty() {
        assert_eq!(filter_query("what is the", &lexicon()), "");
    }

    #[test]
    fn test_idempotent_on_unquoted_output() {
        let once = filter_query("Tell me about the history of Rome!", &lexicon());
        assert_eq!(once, "of rome");
        assert_eq!(filter_query(&once, &lexicon()), once);
    }

    #[test]
    fn test_idempotent_on_filtered_words() {
        for input in ["who is Ada Lovelace", "explain the theory of relativity", "rome"] {
            let once = filter_query(input, &lexicon());
            assert_eq!(filter_query(&once, &lexicon()), once, "input {:?}", input);
        }
    }

    #[test]
    fn test_quoted_stop_words_kept_only_on_first_pass() {
        // Quotes are dropped from the output, so a second pass filters the phrase
        let once = filter_query(r#""The Who" band"#, &lexicon());
        assert_eq!(once, "The Who band");
        assert_eq!(filter_query(&once, &lexicon()), "band");
    }

    #[test]
    fn test_quoted_punctuation_kept_only_on_first_pass() {
        let once = filter_query(r#""AC/DC" songs"#, &lexicon());
        assert_eq!(once, "AC/DC songs");
        assert_eq!(filter_query(&once, &lexicon()), "acdc songs");
    }

    #[test]
    fn test_sanitize_input() {
        assert_eq!(sanitize_input("you can't   stop me!!"), "you cant stop me");
        assert_eq!(sanitize_input(r#"who is "Ada Lovelace"?"#), r#"who is "Ada Lovelace""#);
        assert_eq!(sanitize_input("2."), "2");
    }
}
