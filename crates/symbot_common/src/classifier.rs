//! Trigger classifier - decides whether a turn goes to the encyclopedia.

use crate::lexicon::Lexicon;
use tracing::debug;

/// True when the input opens with a trigger phrase or is fully quoted
pub fn is_encyclopedia_query(input: &str, lexicon: &Lexicon) -> bool {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return false;
    }

    let is_quoted = trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"');
    let lowered = trimmed.to_lowercase();
    let matched = lexicon
        .triggers()
        .iter()
        .find(|trigger| lowered.starts_with(trigger.as_str()));

    match (matched, is_quoted) {
        (Some(trigger), _) => {
            debug!("Encyclopedia trigger {:?} matched", trigger);
            true
        }
        (None, true) => {
            debug!("Fully quoted input routed to encyclopedia");
            true
        }
        (None, false) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_prefix() {
        let lexicon = Lexicon::default();
        assert!(is_encyclopedia_query("who is Ada Lovelace", &lexicon));
        assert!(is_encyclopedia_query("  Explain photosynthesis", &lexicon));
        assert!(!is_encyclopedia_query("I like cats", &lexicon));
    }

    #[test]
    fn test_fully_quoted() {
        let lexicon = Lexicon::default();
        assert!(is_encyclopedia_query(r#""Ada Lovelace""#, &lexicon));
        // Quote must close the input too
        assert!(!is_encyclopedia_query(r#""Ada" is great"#, &lexicon));
        // A lone quote character is not a quoted phrase
        assert!(!is_encyclopedia_query("\"", &lexicon));
    }

    #[test]
    fn test_empty_input() {
        assert!(!is_encyclopedia_query("", &Lexicon::default()));
        assert!(!is_encyclopedia_query("   ", &Lexicon::default()));
    }

    #[test]
    fn test_trigger_not_found_mid_sentence() {
        assert!(!is_encyclopedia_query("tell them who is boss", &Lexicon::default()));
    }
}
