//! Shareable event links carry only the event id, as a query parameter.

use url::Url;

use crate::constants::SHARE_LINK_EVENT_PARAM;
use crate::errors::{Error, Result};

/// Builds `<base_url>?event=<id>`, replacing any existing `event` parameter.
pub fn event_share_link(base_url: &str, event_id: &str) -> Result<String> {
    let mut url = Url::parse(base_url)
        .map_err(|e| Error::invalid_input(format!("Invalid base url '{}': {}", base_url, e)))?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != SHARE_LINK_EVENT_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(SHARE_LINK_EVENT_PARAM, event_id);
    Ok(url.to_string())
}

/// Extracts the event id from a shared link. `None` if the link has none.
pub fn event_id_from_link(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    url.query_pairs()
        .find(|(k, _)| k == SHARE_LINK_EVENT_PARAM)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
