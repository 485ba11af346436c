//! Reflection - rephrase "I feel X"-style statements as probing questions.
//!
//! Keys are tried in table order and must match at the start of the
//! lower-cased input on a word boundary. The remainder gets its object
//! pronouns swapped and is appended to the stem with a question mark.

use tracing::debug;

/// Leading phrase -> question stem, in match order
pub const REFLECTIONS: &[(&str, &str)] = &[
    ("i am", "Why do you believe you are"),
    ("i feel", "What makes you feel"),
    ("i think", "Why do you think"),
    ("i want", "Why do you want"),
    ("i hate", "What makes you hate"),
    ("i love", "Why do you love"),
    ("i need", "Why do you need"),
    ("i should", "Why do you feel you should"),
    ("i hope", "What makes you hopeful"),
    ("i miss", "Why do you miss"),
    ("i regret", "What do you regret about"),
    ("i forgive", "What made you forgive"),
    ("you are", "Why do you believe I am"),
    ("you feel", "What makes you think I feel"),
    ("you think", "Why do you think"),
    ("you want", "Why do I want"),
    ("you hate", "What would make me hate"),
    ("you love", "Why do I love"),
    ("you need", "Why do I need"),
    ("you should", "Why do you feel I should"),
    ("you hope", "What would make me hopeful"),
    ("you miss", "Why do I miss"),
    ("you regret", "What do I regret about"),
    ("you forgive", "What made me forgive"),
    ("you cant", "Why do you believe that"),
    ("we are", "Why do you believe we are"),
    ("we feel", "What makes you think we feel"),
    ("we think", "Why do we think"),
    ("we want", "Why do we want"),
    ("we hate", "What would make us hate"),
    ("we love", "Why do we love"),
    ("we need", "Why do we need"),
    ("we should", "Why do you feel we should"),
    ("we hope", "What would make us hopeful"),
    ("we miss", "Why do we miss"),
    ("we regret", "What do we regret about"),
    ("we forgive", "What made us forgive"),
    ("they are", "Why do you believe they are"),
    ("they feel", "What makes you think they feel"),
    ("they think", "Why do they think"),
    ("they want", "Why do they want"),
    ("they hate", "What would make them hate"),
    ("they love", "Why do they love"),
    ("they need", "Why do they need"),
    ("they should", "Why do you feel they should"),
    ("they hope", "What would make them hopeful"),
    ("they miss", "Why do they miss"),
    ("they regret", "What do they regret about"),
    ("they forgive", "What made them forgive"),
];

/// Object pronoun swaps applied to the remainder
pub const OBJECT_PRONOUNS: &[(&str, &str)] = &[
    ("me", "you"),
    ("you", "me"),
    ("my", "your"),
    ("your", "my"),
    ("us", "them"),
    ("them", "us"),
    ("him", "her"),
    ("her", "him"),
    ("mine", "yours"),
    ("yours", "mine"),
];

/// Stem whose key opens `normalized` on a word boundary, with the remainder
fn match_key(normalized: &str) -> Option<(&'static str, &'static str, &str)> {
    REFLECTIONS.iter().find_map(|(key, stem)| {
        let rest = normalized.strip_prefix(key)?;
        let on_boundary = rest
            .chars()
            .next()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_'));
        on_boundary.then_some((*key, *stem, rest))
    })
}

/// Swap object pronouns word by word
pub fn swap_pronouns(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            OBJECT_PRONOUNS
                .iter()
                .find(|(from, _)| *from == lower)
                .map_or(word, |(_, to)| *to)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rephrase input as a question, or `None` if no key opens it
pub fn reflect(input: &str) -> Option<String> {
    let normalized = input.trim().to_lowercase();
    let Some((key, stem, rest)) = match_key(&normalized) else {
        debug!("No reflection matched");
        return None;
    };

    let rest = rest.trim().trim_end_matches(&['?', '.', '!'][..]).trim_end();
    let swapped = swap_pronouns(rest);
    let reflected = if swapped.is_empty() {
        format!("{}?", stem)
    } else {
        format!("{} {}?", stem, swapped)
    };

    debug!("Reflection matched key {:?}: {:?}", key, reflected);
    Some(reflected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_reflection() {
        assert_eq!(
            reflect("I feel tired of my job").as_deref(),
            Some("What makes you feel tired of your job?")
        );
    }

    #[test]
    fn test_pronouns_swapped_both_ways() {
        assert_eq!(
            reflect("you hate me and my cat").as_deref(),
            Some("What would make me hate you and your cat?")
        );
        assert_eq!(
            reflect("they want us to leave them").as_deref(),
            Some("Why do they want them to leave us?")
        );
    }

    #[test]
    fn test_requires_word_boundary() {
        // "i amazed" must not match "i am"
        assert!(reflect("i amazed everyone").is_none());
        assert!(reflect("youth are great").is_none());
    }

    #[test]
    fn test_anchored_at_start() {
        assert!(reflect("sometimes i feel sad").is_none());
    }

    #[test]
    fn test_no_match() {
        assert!(reflect("the weather is nice").is_none());
        assert!(reflect("").is_none());
    }

    #[test]
    fn test_bare_key_has_no_dangling_space() {
        assert_eq!(reflect("we should").as_deref(), Some("Why do you feel we should?"));
    }

    #[test]
    fn test_trailing_punctuation_not_doubled() {
        assert_eq!(
            reflect("I think it is late?").as_deref(),
            Some("Why do you think it is late?")
        );
    }

    #[test]
    fn test_table_order_is_pinned() {
        // Subject groups appear in i, you, we, they order; first match wins
        let keys: Vec<&str> = REFLECTIONS.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys[0], "i am");
        assert_eq!(keys[12], "you are");
        assert_eq!(keys[24], "you cant");
        assert_eq!(keys[25], "we are");
        assert_eq!(keys[37], "they are");
        assert_eq!(keys.len(), 49);
    }

    #[test]
    fn test_you_cant_key() {
        assert_eq!(
            reflect("you cant understand me").as_deref(),
            Some("Why do you believe that understand you?")
        );
    }

    #[test]
    fn test_every_stem_reflects_to_question() {
        for (key, stem) in REFLECTIONS {
            let reflected = reflect(&format!("{} something", key)).unwrap();
            assert!(reflected.starts_with(stem), "{} -> {}", key, reflected);
            assert!(reflected.ends_with('?'));
        }
    }
}
