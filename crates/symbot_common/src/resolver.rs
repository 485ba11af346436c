//! Response resolver - one user turn in, one `Answer` out.
//!
//! Stage order, first producer wins:
//! 1. pending disambiguation selection
//! 2. `help`
//! 3. canned replies
//! 4. reflection
//! 5. encyclopedia (trigger phrase or fully quoted input)
//! 6. random continuation prompt
//!
//! `resolve` never fails; anything that goes wrong inside the pipeline is
//! reported as a generic apology.

use crate::answer::{Answer, MSG_PROCESSING_ERROR};
use crate::canned::CannedReplies;
use crate::chooser::{Chooser, RandomChooser};
use crate::classifier::is_encyclopedia_query;
use crate::config::Config;
use crate::disambiguation::{DisambiguationSession, Selection};
use crate::error::SymbotError;
use crate::lexicon::Lexicon;
use crate::query_filter::{filter_query, sanitize_input};
use crate::reflection::reflect;
use crate::wiki_client::{Lookup, WikiClient};
use crate::wiki_transport::WikiTransport;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Reserved keyword that bypasses every other stage
pub const HELP_COMMAND: &str = "help";

pub const HELP_TEXT: &str = "Here are the commands you can use:<br>\
- <b>help</b>: Displays this help menu.<br>\
- <b>Double Quotes</b>: Using double quotes around words will send those words to Wikipedia.<br>\
- <b>Wiki Triggers</b>: Starting with one of these words sends the sentence to Wikipedia: Who, What, Where, When, Why, How, Explain, Describe.<br>\
- <b>Specified Responses</b>: Chat using questions like: What are you doing, how are you, goodbye.<br>\
- <b>Reflections</b>: Try statements such as: I feel, you are, we should, they want.<br>\
- <b>Pronoun Types</b>: Used with Reflections. Such as: I, you, me, he, she, your, they.<br>\
- <b>Jokes</b>: Type \"Tell me a joke\" to hear one.<br>\
[END OF HELP MENU]";

/// Generic continuation prompts used when nothing else matches
pub const FALLBACK_PROMPTS: &[&str] = &[
    "I see. That's interesting. Tell me more.",
    "Can you elaborate more on that?",
    "I'm here to listen. What else is on your mind?",
    "Could you explain that a bit more?",
    "By the way, you can type 'help' for a list of commands.",
];

/// Which stage produced an answer (logged per turn)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Selection,
    Help,
    Canned,
    Reflection,
    Encyclopedia,
    Disambiguation,
    Fallback,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Selection => "selection",
            Self::Help => "help",
            Self::Canned => "canned",
            Self::Reflection => "reflection",
            Self::Encyclopedia => "encyclopedia",
            Self::Disambiguation => "disambiguation",
            Self::Fallback => "fallback",
        };
        write!(f, "{}", s)
    }
}

pub struct Resolver {
    lexicon: Lexicon,
    canned: CannedReplies,
    wiki: WikiClient,
    session: DisambiguationSession,
    chooser: Box<dyn Chooser>,
    last_answer: Option<Answer>,
}

impl Resolver {
    pub fn new(config: &Config, canned: CannedReplies, transport: Arc<dyn WikiTransport>) -> Self {
        Self {
            lexicon: config.lexicon.build(),
            canned,
            wiki: WikiClient::new(transport, config.wiki.clone()),
            session: DisambiguationSession::new(),
            chooser: Box::new(RandomChooser),
            last_answer: None,
        }
    }

    /// Replace the random source (tests pin it with `FixedChooser`)
    pub fn with_chooser(mut self, chooser: Box<dyn Chooser>) -> Self {
        self.chooser = chooser;
        self
    }

    pub fn session(&self) -> &DisambiguationSession {
        &self.session
    }

    /// Most recent answer, for attribution rendered after the fact
    pub fn last_answer(&self) -> Option<&Answer> {
        self.last_answer.as_ref()
    }

    /// Resolve one turn. Always returns a presentable answer.
    pub async fn resolve(&mut self, raw_input: &str) -> Answer {
        let span = info_span!("turn", id = %Uuid::new_v4());
        let result = self
            .run_pipeline(raw_input)
            .instrument(span)
            .await
            .and_then(|(stage, answer)| {
                if answer.is_presentable() {
                    info!("Turn answered by {} stage", stage);
                    Ok(answer)
                } else {
                    warn!("Stage {} produced an empty answer", stage);
                    Err(SymbotError::EmptyAnswer)
                }
            });

        let answer = result.unwrap_or_else(|e| {
            error!("Error processing message ({}): {}", e.kind(), e);
            Answer::text(MSG_PROCESSING_ERROR)
        });

        self.last_answer = Some(answer.clone());
        answer
    }

    async fn run_pipeline(&mut self, raw_input: &str) -> Result<(Stage, Answer), SymbotError> {
        let trimmed = raw_input.trim();
        debug!("User input received: {:?}", trimmed);

        if self.session.is_awaiting() {
            let cleaned = sanitize_input(trimmed);
            match self.session.select(&cleaned) {
                Selection::Chosen(option) => {
                    let answer = self.wiki.fetch_selection(&option).await;
                    return Ok((Stage::Selection, answer));
                }
                Selection::Rejected | Selection::NotAwaiting => {
                    info!("Re-routing rejected selection as a new query");
                }
            }
        }

        let cleaned = sanitize_input(trimmed);

        if cleaned.trim().to_lowercase() == HELP_COMMAND {
            info!("Help command triggered");
            return Ok((Stage::Help, Answer::text(HELP_TEXT)));
        }

        // Canned triggers may contain apostrophes, so match the unsanitized text
        if let Some(reply) = self.canned.find(trimmed, self.chooser.as_ref()) {
            info!("Canned reply matched");
            return Ok((Stage::Canned, Answer::text(reply)));
        }

        if let Some(reflected) = reflect(&cleaned) {
            info!("Reflection generated");
            return Ok((Stage::Reflection, Answer::text(reflected)));
        }

        if is_encyclopedia_query(&cleaned, &self.lexicon) {
            let query = filter_query(&cleaned, &self.lexicon);
            info!("Encyclopedia query: {:?}", query);
            return Ok(match self.wiki.fetch_summary(&query).await {
                Lookup::Answer(answer) => (Stage::Encyclopedia, answer),
                Lookup::Options(options) => {
                    let prompt = options.prompt();
                    self.session.arm(options);
                    (Stage::Disambiguation, prompt)
                }
            });
        }

        info!("No match found, providing fallback prompt");
        let pick = self.chooser.pick(FALLBACK_PROMPTS.len());
        let prompt = FALLBACK_PROMPTS
            .get(pick)
            .ok_or_else(|| SymbotError::Internal(format!("fallback index {} out of range", pick)))?;
        Ok((Stage::Fallback, Answer::text(*prompt)))
    }
}
