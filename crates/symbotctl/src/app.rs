//! Wiring: config + dataset + HTTP transport -> resolver.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use symbot_common::{CannedReplies, Config, HttpWikiTransport, Resolver};
use tracing::{info, warn};

/// Dataset shipped inside the binary, used when no path is configured
pub const BUNDLED_RESPONSES: &str = include_str!("../data/responses.json");

/// Canned replies from `override_path`, else `[responses] path`, else the
/// bundled dataset. Any load failure disables canned replies.
pub async fn load_canned(config: &Config, override_path: Option<&Path>) -> CannedReplies {
    match override_path.or(config.responses.path.as_deref()) {
        Some(path) => CannedReplies::load_or_disabled(path).await,
        None => match CannedReplies::from_json_str(BUNDLED_RESPONSES) {
            Ok(replies) => {
                info!("Loaded {} bundled canned replies", replies.len());
                replies
            }
            Err(e) => {
                warn!("Bundled canned replies unusable, matching disabled: {}", e);
                CannedReplies::disabled()
            }
        },
    }
}

/// Build a resolver backed by the live encyclopedia.
pub async fn build_resolver(config: &Config, responses: Option<&Path>) -> Result<Resolver> {
    let canned = load_canned(config, responses).await;
    let transport = HttpWikiTransport::new(&config.wiki)?;

    info!(
        "Resolver ready: {} canned replies, wiki API {}",
        canned.len(),
        config.wiki.api_url
    );
    Ok(Resolver::new(config, canned, Arc::new(transport)))
}
