//! Wiki Transport - the remote boundary of the encyclopedia client.
//!
//! Production code uses `HttpWikiTransport` (reqwest against the MediaWiki
//! action API). Tests use `FakeWikiTransport` with pre-configured JSON
//! keyed by request, so nothing touches the network.

use crate::config::WikiConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info};

/// The two lookups the encyclopedia client performs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WikiRequest {
    /// Intro extract + thumbnail for a title
    Summary { title: String },
    /// Rendered HTML of a page (used for disambiguation lists)
    Parse { page: String },
}

impl WikiRequest {
    pub fn summary(title: impl Into<String>) -> Self {
        Self::Summary {
            title: title.into(),
        }
    }

    pub fn parse(page: impl Into<String>) -> Self {
        Self::Parse { page: page.into() }
    }

    /// Query-string parameters for the action API
    pub fn query_pairs(&self, thumbnail_size: u32) -> Vec<(&'static str, String)> {
        match self {
            WikiRequest::Summary { title } => vec![
                ("action", "query".to_string()),
                ("prop", "extracts|pageimages".to_string()),
                ("exintro", String::new()),
                ("titles", title.clone()),
                ("format", "json".to_string()),
                ("redirects", "1".to_string()),
                ("pithumbsize", thumbnail_size.to_string()),
                ("origin", "*".to_string()),
            ],
            WikiRequest::Parse { page } => vec![
                ("action", "parse".to_string()),
                ("page", page.clone()),
                ("format", "json".to_string()),
                ("prop", "text".to_string()),
                ("origin", "*".to_string()),
            ],
        }
    }
}

impl std::fmt::Display for WikiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WikiRequest::Summary { title } => write!(f, "summary({})", title),
            WikiRequest::Parse { page } => write!(f, "parse({})", page),
        }
    }
}

/// Wiki transport errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WikiClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Unexpected response shape: {0}")]
    Shape(String),
}

/// Fetch raw JSON for a wiki request
#[async_trait]
pub trait WikiTransport: Send + Sync {
    async fn fetch(&self, request: &WikiRequest) -> Result<serde_json::Value, WikiClientError>;
}

// ============================================================================
// HTTP transport (production)
// ============================================================================

pub struct HttpWikiTransport {
    api_url: String,
    thumbnail_size: u32,
    http: reqwest::Client,
}

impl HttpWikiTransport {
    pub fn new(config: &WikiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_url: config.api_url.clone(),
            thumbnail_size: config.thumbnail_size,
            http,
        })
    }
}

#[async_trait]
impl WikiTransport for HttpWikiTransport {
    async fn fetch(&self, request: &WikiRequest) -> Result<serde_json::Value, WikiClientError> {
        debug!("Connecting to wiki API: {} {}", self.api_url, request);

        let response = self
            .http
            .get(&self.api_url)
            .query(&request.query_pairs(self.thumbnail_size))
            .send()
            .await
            .map_err(|e| WikiClientError::Network(e.to_string()))?;

        let status = response.status();
        info!("Wiki API {} responded with {}", request, status);
        if !status.is_success() {
            return Err(WikiClientError::Status(status.as_u16()));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| WikiClientError::Shape(e.to_string()))
    }
}

// ============================================================================
// Fake transport (testing)
// ============================================================================

/// Pre-configured responses; unknown requests answer with `Status(404)`
#[derive(Default)]
pub struct FakeWikiTransport {
    responses: HashMap<WikiRequest, Result<serde_json::Value, WikiClientError>>,
    calls: Mutex<Vec<WikiRequest>>,
}

impl FakeWikiTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, request: WikiRequest, json: serde_json::Value) -> Self {
        self.responses.insert(request, Ok(json));
        self
    }

    pub fn with_error(mut self, request: WikiRequest, error: WikiClientError) -> Self {
        self.responses.insert(request, Err(error));
        self
    }

    /// Requests received so far, in order
    pub fn calls(&self) -> Vec<WikiRequest> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }
}

#[async_trait]
impl WikiTransport for FakeWikiTransport {
    async fn fetch(&self, request: &WikiRequest) -> Result<serde_json::Value, WikiClientError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.clone());
        }
        self.responses
            .get(request)
            .cloned()
            .unwrap_or(Err(WikiClientError::Status(404)))
    }
}

/// Summary response with a single page
pub fn fake_summary_page(title: &str, extract: &str, thumbnail: Option<&str>) -> serde_json::Value {
    let mut page = serde_json::json!({
        "pageid": 1,
        "ns": 0,
        "title": title,
        "extract": extract,
    });
    if let Some(source) = thumbnail {
        page["thumbnail"] = serde_json::json!({ "source": source, "width": 500, "height": 400 });
    }
    serde_json::json!({ "batchcomplete": "", "query": { "pages": { "1": page } } })
}

/// Summary response for a title with no page
pub fn fake_missing_page(title: &str) -> serde_json::Value {
    serde_json::json!({
        "batchcomplete": "",
        "query": { "pages": { "-1": { "ns": 0, "title": title, "missing": "" } } }
    })
}

/// Parse response wrapping an HTML fragment
pub fn fake_parse_page(title: &str, html: &str) -> serde_json::Value {
    serde_json::json!({ "parse": { "title": title, "pageid": 2, "text": { "*": html } } })
}
