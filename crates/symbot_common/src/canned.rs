//! Canned replies - fixed answers keyed by substring triggers.
//!
//! The dataset is a JSON document `{"responses": [{"triggers": [...],
//! "response": "..." | [...]}]}` loaded once at start-up. A missing or
//! malformed file disables matching instead of failing the bot.

use crate::chooser::Chooser;
use crate::error::SymbotError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Single reply or a set of alternatives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplyText {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CannedReply {
    #[serde(default)]
    pub triggers: Vec<String>,
    pub response: ReplyText,
}

#[derive(Debug, Deserialize)]
struct Dataset {
    #[serde(default)]
    responses: Vec<CannedReply>,
}

/// Loaded canned-reply table, in file order
#[derive(Debug, Clone, Default)]
pub struct CannedReplies {
    entries: Vec<CannedReply>,
}

impl CannedReplies {
    pub fn new(entries: Vec<CannedReply>) -> Self {
        Self { entries }
    }

    /// Empty table: every lookup misses
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, SymbotError> {
        let dataset: Dataset = serde_json::from_str(json)?;
        Ok(Self::new(dataset.responses))
    }

    pub async fn load(path: &Path) -> Result<Self, SymbotError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SymbotError::Dataset(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    /// Load the dataset, degrading to an empty table on any failure
    pub async fn load_or_disabled(path: &Path) -> Self {
        match Self::load(path).await {
            Ok(replies) => {
                info!("Loaded {} canned replies from {:?}", replies.len(), path);
                replies
            }
            Err(e) => {
                warn!("Canned replies unavailable, matching disabled: {}", e);
                Self::disabled()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry with a trigger contained in the lower-cased input wins.
    pub fn find(&self, input: &str, chooser: &dyn Chooser) -> Option<String> {
        if self.entries.is_empty() {
            debug!("Canned replies empty, skipping match");
            return None;
        }

        let normalized = input.to_lowercase();
        for entry in &self.entries {
            let hit = entry.triggers.iter().any(|trigger| {
                let trigger = trigger.to_lowercase();
                !trigger.is_empty() && normalized.contains(&trigger)
            });
            if !hit {
                continue;
            }

            match &entry.response {
                ReplyText::One(text) => return Some(text.clone()),
                ReplyText::Many(options) => match options.get(chooser.pick(options.len().max(1))) {
                    Some(text) => return Some(text.clone()),
                    None => warn!("Canned reply {:?} has no alternatives, skipping", entry.triggers),
                },
            }
        }

        None
    }
}
