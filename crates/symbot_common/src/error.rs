//! Error types for SymbolicBot.
//!
//! Config loading reports through `anyhow`; encyclopedia failures are turned
//! into apology answers inside `wiki_client`. What remains here is the
//! dataset and pipeline side.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SymbotError {
    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Pipeline produced an empty answer")]
    EmptyAnswer,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SymbotError {
    /// Short stable tag used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            SymbotError::Dataset(_) => "dataset",
            SymbotError::EmptyAnswer => "empty_answer",
            SymbotError::Json(_) => "json",
            SymbotError::Internal(_) => "internal",
        }
    }
}
