//! Disambiguation session - the numbered-menu sub-dialogue.
//!
//! Two states: `Idle` and `AwaitingSelection(options)`. Arming always
//! replaces the previous list; any selection attempt returns the session
//! to `Idle`, whether or not the choice was valid.

use crate::answer::Answer;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One candidate meaning of an ambiguous title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisambiguationOption {
    /// Candidate title as shown to the user
    pub text: String,
    pub description: String,
    /// Title passed to the summary lookup when chosen
    pub lookup_key: String,
}

impl DisambiguationOption {
    pub fn new(text: impl Into<String>, description: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            lookup_key: text.clone(),
            text,
            description: description.into(),
        }
    }
}

/// Non-empty option list, displayed 1..=N
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionList(Vec<DisambiguationOption>);

impl OptionList {
    /// `None` for an empty list
    pub fn new(options: Vec<DisambiguationOption>) -> Option<Self> {
        if options.is_empty() {
            None
        } else {
            Some(Self(options))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_slice(&self) -> &[DisambiguationOption] {
        &self.0
    }

    /// Look up a 1-based selection
    pub fn get_numbered(&self, number: usize) -> Option<&DisambiguationOption> {
        number.checked_sub(1).and_then(|index| self.0.get(index))
    }

    /// Menu shown to the user while a selection is pending
    pub fn prompt(&self) -> Answer {
        let lines = self
            .0
            .iter()
            .enumerate()
            .map(|(index, option)| format!("{}. {} - {}", index + 1, option.text, option.description))
            .collect::<Vec<_>>()
            .join("<br>");

        Answer::text(format!(
            "This topic has multiple references. Please select one by typing the corresponding number:<br><br>{}<br><br>[END OF LIST]",
            lines
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingSelection(OptionList),
}

/// Result of feeding a turn to an armed session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Valid 1-based choice
    Chosen(DisambiguationOption),
    /// Not a number or out of range; treat the text as a new query
    Rejected,
    /// Nothing was pending
    NotAwaiting,
}

#[derive(Debug, Default)]
pub struct DisambiguationSession {
    state: SessionState,
}

impl DisambiguationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, SessionState::AwaitingSelection(_))
    }

    /// Enter `AwaitingSelection`, replacing any pending list
    pub fn arm(&mut self, options: OptionList) {
        if self.is_awaiting() {
            info!("Replacing pending disambiguation list");
        }
        info!("Awaiting selection among {} options", options.len());
        self.state = SessionState::AwaitingSelection(options);
    }

    /// Consume one turn as a selection. Always leaves the session `Idle`.
    pub fn select(&mut self, input: &str) -> Selection {
        let SessionState::AwaitingSelection(options) = std::mem::take(&mut self.state) else {
            return Selection::NotAwaiting;
        };

        let chosen = input
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|number| options.get_numbered(number));

        match chosen {
            Some(option) => {
                info!("Valid selection: {}", option.text);
                Selection::Chosen(option.clone())
            }
            None => {
                warn!("Invalid selection {:?}, treating as a new query", input.trim());
                Selection::Rejected
            }
        }
    }

    /// Drop any pending list
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mercury() -> OptionList {
        OptionList::new(vec![
            DisambiguationOption::new("Mercury (element)", "a chemical element"),
            DisambiguationOption::new("Mercury (planet)", "the closest planet to the Sun"),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_list_rejected() {
        assert!(OptionList::new(vec![]).is_none());
    }

    #[test]
    fn test_numbered_lookup_is_one_based() {
        let options = mercury();
        assert!(options.get_numbered(0).is_none());
        assert_eq!(options.get_numbered(1).unwrap().text, "Mercury (element)");
        assert_eq!(options.get_numbered(2).unwrap().text, "Mercury (planet)");
        assert!(options.get_numbered(3).is_none());
    }

    #[test]
    fn test_prompt_enumerates_options() {
        let prompt = mercury().prompt();
        assert!(prompt.text.contains("1. Mercury (element) - a chemical element"));
        assert!(prompt.text.contains("<br>2. Mercury (planet) - the closest planet to the Sun"));
        assert!(prompt.text.ends_with("[END OF LIST]"));
        assert!(prompt.image.is_none());
    }

    #[test]
    fn test_idle_by_default() {
        let mut session = DisambiguationSession::new();
        assert!(!session.is_awaiting());
        assert_eq!(session.select("1"), Selection::NotAwaiting);
    }

    #[test]
    fn test_valid_selection_returns_to_idle() {
        let mut session = DisambiguationSession::new();
        session.arm(mercury());
        assert!(session.is_awaiting());

        match session.select(" 2 ") {
            Selection::Chosen(option) => assert_eq!(option.lookup_key, "Mercury (planet)"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(session.state(), &SessionState::Idle);
    }

    #[test]
    fn test_out_of_range_and_non_numeric_reject() {
        for input in ["9", "0", "-1", "two", "", "1.5"] {
            let mut session = DisambiguationSession::new();
            session.arm(mercury());
            assert_eq!(session.select(input), Selection::Rejected, "input {:?}", input);
            assert!(!session.is_awaiting());
        }
    }

    #[test]
    fn test_arm_replaces_previous_list() {
        let mut session = DisambiguationSession::new();
        session.arm(mercury());
        session.arm(
            OptionList::new(vec![DisambiguationOption::new("Java (island)", "in Indonesia")]).unwrap(),
        );
        match session.state() {
            SessionState::AwaitingSelection(options) => {
                assert_eq!(options.len(), 1);
                assert_eq!(options.as_slice()[0].text, "Java (island)");
            }
            SessionState::Idle => panic!("expected awaiting"),
        }
        assert_eq!(session.select("2"), Selection::Rejected);
    }

    #[test]
    fn test_reset() {
        let mut session = DisambiguationSession::new();
        session.arm(mercury());
        session.reset();
        assert!(!session.is_awaiting());
    }
}
