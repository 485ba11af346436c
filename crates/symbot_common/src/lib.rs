//! SymbolicBot core - resolves one chat turn into an answer.
//!
//! Canned replies, ELIZA-style reflection and encyclopedia lookups with a
//! numbered disambiguation menu, driven by `resolver::Resolver`.

pub mod answer;
pub mod canned;
pub mod chooser;
pub mod classifier;
pub mod config;
pub mod disambiguation;
pub mod error;
pub mod lexicon;
pub mod query_filter;
pub mod reflection;
pub mod resolver;
pub mod wiki_client;
pub mod wiki_transport;

pub use answer::Answer;
pub use canned::{CannedReplies, CannedReply, ReplyText};
pub use chooser::{Chooser, FixedChooser, RandomChooser};
pub use classifier::is_encyclopedia_query;
pub use config::Config;
pub use disambiguation::{DisambiguationOption, DisambiguationSession, OptionList, Selection, SessionState};
pub use error::SymbotError;
pub use lexicon::Lexicon;
pub use query_filter::{filter_query, sanitize_input};
pub use reflection::reflect;
pub use resolver::{Resolver, Stage};
pub use wiki_client::{Lookup, WikiClient};
pub use wiki_transport::{FakeWikiTransport, HttpWikiTransport, WikiClientError, WikiRequest, WikiTransport};
