//! Wiki Client - turns encyclopedia lookups into answers.
//!
//! Every transport or shape failure is converted here into an apology
//! `Answer`; callers never see raw errors. A summary whose extract carries
//! the disambiguation marker is expanded into a numbered option list.

use crate::answer::{
    Answer, MSG_DISAMBIGUATION_ERROR, MSG_NOT_FOUND, MSG_NO_DETAILS, MSG_NO_OPTIONS,
    MSG_SELECTION_ERROR, MSG_SELECTION_MISSING, MSG_SUMMARY_ERROR,
};
use crate::config::WikiConfig;
use crate::disambiguation::{DisambiguationOption, OptionList};
use crate::wiki_transport::{WikiClientError, WikiRequest, WikiTransport};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, warn};

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Marks that stay literal in a URI component, so "Mercury (planet)" links
/// keep their parentheses
const URI_COMPONENT_MARKS: &[(&str, &str)] = &[
    ("%28", "("),
    ("%29", ")"),
    ("%21", "!"),
    ("%2A", "*"),
    ("%27", "'"),
];

/// Outcome of a lookup: a direct answer or a list to choose from
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Answer(Answer),
    Options(OptionList),
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: QueryBody,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: BTreeMap<String, PageEntry>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    thumbnail: Option<Thumbnail>,
    #[serde(default)]
    missing: Option<serde_json::Value>,
    #[serde(default)]
    invalid: Option<serde_json::Value>,
}

impl PageEntry {
    fn is_absent(&self) -> bool {
        self.missing.is_some() || self.invalid.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    source: String,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    parse: ParseBody,
}

#[derive(Debug, Deserialize)]
struct ParseBody {
    text: ParseText,
}

#[derive(Debug, Deserialize)]
struct ParseText {
    #[serde(rename = "*")]
    html: String,
}

/// Remove HTML tags from an extract
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").trim().to_string()
}

/// Collect `<ul><li><a>` entries from rendered page HTML.
///
/// The description is the link's parent text with the link text removed.
/// Links without an `href` or visible text are skipped.
pub fn parse_disambiguation_html(html: &str) -> Vec<DisambiguationOption> {
    use scraper::{ElementRef, Html, Selector};

    let fragment = Html::parse_fragment(html);
    let Ok(selector) = Selector::parse("ul li a") else {
        return Vec::new();
    };

    fragment
        .select(&selector)
        .filter_map(|link| {
            let term = link.text().collect::<String>().trim().to_string();
            link.value().attr("href")?;
            if term.is_empty() {
                return None;
            }

            let description = link
                .parent()
                .and_then(ElementRef::wrap)
                .map(|parent| parent.text().collect::<String>())
                .map(|text| {
                    text.replacen(&term, "", 1)
                        .trim_start_matches(|c: char| c == ',' || c.is_whitespace())
                        .trim_end()
                        .to_string()
                })
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| "No description available".to_string());

            info!("Disambiguation item found: {}", term);
            Some(DisambiguationOption::new(term, description))
        })
        .collect()
}

/// Encyclopedia client over a pluggable transport
#[derive(Clone)]
pub struct WikiClient {
    transport: Arc<dyn WikiTransport>,
    config: WikiConfig,
}

impl WikiClient {
    pub fn new(transport: Arc<dyn WikiTransport>, config: WikiConfig) -> Self {
        Self { transport, config }
    }

    /// Canonical article URL for a title
    pub fn page_url(&self, title: &str) -> String {
        let encoded = URI_COMPONENT_MARKS
            .iter()
            .fold(urlencoding::encode(title).into_owned(), |acc, (escaped, mark)| {
                acc.replace(escaped, mark)
            });
        format!("{}{}", self.config.page_url, encoded)
    }

    async fn fetch_pages(&self, title: &str) -> Result<Option<PageEntry>, WikiClientError> {
        let json = self.transport.fetch(&WikiRequest::summary(title)).await?;
        let response: QueryResponse =
            serde_json::from_value(json).map_err(|e| WikiClientError::Shape(e.to_string()))?;
        Ok(response
            .query
            .pages
            .into_values()
            .next()
            .filter(|page| !page.is_absent()))
    }

    /// Summary lookup; may turn into a disambiguation list
    pub async fn fetch_summary(&self, term: &str) -> Lookup {
        if term.trim().is_empty() {
            warn!("Empty search term, nothing to look up");
            return Lookup::Answer(Answer::text(MSG_NOT_FOUND));
        }

        info!("Fetching wiki summary for {:?}", term);
        let page = match self.fetch_pages(term).await {
            Ok(Some(page)) => page,
            Ok(None) => {
                warn!("No valid pages found for {:?}", term);
                return Lookup::Answer(Answer::text(MSG_NOT_FOUND));
            }
            Err(e) => {
                error!("Error fetching wiki summary: {}", e);
                return Lookup::Answer(Answer::text(MSG_SUMMARY_ERROR));
            }
        };

        let extract = page.extract.unwrap_or_default();
        if extract.contains(&self.config.disambiguation_marker) {
            info!("Detected disambiguation page for {:?}", term);
            return self.fetch_disambiguation_options(term).await;
        }

        let title = page.title.unwrap_or_else(|| term.to_string());
        let text = Some(strip_tags(&extract))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| MSG_NO_DETAILS.to_string());

        Lookup::Answer(
            Answer::text(text)
                .with_source(self.page_url(&title))
                .with_license(self.config.license_url.as_str())
                .with_image(page.thumbnail.map(|t| t.source)),
        )
    }

    /// Rendered-page lookup producing selectable options
    pub async fn fetch_disambiguation_options(&self, term: &str) -> Lookup {
        info!("Fetching disambiguation details for {:?}", term);
        let html = match self.fetch_parse_html(term).await {
            Ok(html) => html,
            Err(e) => {
                error!("Error fetching disambiguation page: {}", e);
                return Lookup::Answer(Answer::text(MSG_DISAMBIGUATION_ERROR));
            }
        };

        match OptionList::new(parse_disambiguation_html(&html)) {
            Some(options) => {
                info!("Found {} disambiguation options for {:?}", options.len(), term);
                Lookup::Options(options)
            }
            None => {
                warn!("No relevant options found in disambiguation page for {:?}", term);
                Lookup::Answer(Answer::text(MSG_NO_OPTIONS))
            }
        }
    }

    async fn fetch_parse_html(&self, page: &str) -> Result<String, WikiClientError> {
        let json = self.transport.fetch(&WikiRequest::parse(page)).await?;
        let response: ParseResponse =
            serde_json::from_value(json).map_err(|e| WikiClientError::Shape(e.to_string()))?;
        Ok(response.parse.text.html)
    }

    /// Full summary for an option the user picked. Never re-enters
    /// disambiguation.
    pub async fn fetch_selection(&self, option: &DisambiguationOption) -> Answer {
        info!("Fetching full article for selected option {:?}", option.text);
        let page = match self.fetch_pages(&option.lookup_key).await {
            Ok(Some(page)) => page,
            Ok(None) => {
                warn!("Selected option {:?} has no page", option.text);
                return Answer::text(MSG_SELECTION_MISSING);
            }
            Err(e) => {
                error!("Error fetching selected option: {}", e);
                return Answer::text(MSG_SELECTION_ERROR);
            }
        };

        let title = page.title.unwrap_or_else(|| option.text.clone());
        let extract = page
            .extract
            .as_deref()
            .map(strip_tags)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| MSG_NO_DETAILS.to_string());

        Answer::text(format!("You selected: {}<br><br>{}", option.text, extract))
            .with_source(self.page_url(&title))
            .with_license(self.config.license_url.as_str())
            .with_image(page.thumbnail.map(|t| t.source))
    }
}
