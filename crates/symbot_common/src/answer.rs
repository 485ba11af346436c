//! Answer - the unit handed to the renderer for every resolved turn.
//!
//! `text` may carry simple inline markup (`<br>`, `<b>`). Error paths never
//! leave it empty: they substitute one of the apology strings below.

use serde::{Deserialize, Serialize};

/// Generic failure at the resolver boundary
pub const MSG_PROCESSING_ERROR: &str = "There was an error processing your message. Please try again.";
/// Summary lookup failed (transport, status or shape)
pub const MSG_SUMMARY_ERROR: &str = "There was an error fetching information from Wikipedia.";
/// Summary lookup found no page
pub const MSG_NOT_FOUND: &str = "Sorry, I couldn't find relevant information on that topic.";
/// Page exists but has no extract
pub const MSG_NO_DETAILS: &str = "No detailed information available.";
/// Disambiguation listing failed
pub const MSG_DISAMBIGUATION_ERROR: &str =
    "There was an error fetching disambiguation details from Wikipedia.";
/// Disambiguation listing had nothing selectable
pub const MSG_NO_OPTIONS: &str = "No relevant options were found for this topic.";
/// Selected option's page is missing
pub const MSG_SELECTION_MISSING: &str = "Sorry, I couldn't fetch details for the selected option.";
/// Selected option's lookup failed
pub const MSG_SELECTION_ERROR: &str =
    "There was an error fetching the full article. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

impl Answer {
    /// Plain text answer with no attribution
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
            source: None,
            license: None,
        }
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// True when the renderer should append source/license lines
    pub fn has_attribution(&self) -> bool {
        self.source.is_some() && self.license.is_some()
    }

    /// Whether `text` satisfies the non-empty invariant
    pub fn is_presentable(&self) -> bool {
        !self.text.trim().is_empty()
    }
}
