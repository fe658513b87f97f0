//! Shared HTTP client with User-Agent rotation for backend requests.
//!
//! Provides a configured [`reqwest::Client`] with browser-like headers and
//! a single helper for "GET this, give me the markup" used by both the
//! source adapters and the content extractor.

use std::time::Duration;

use rand::seq::SliceRandom;
use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::config::SearchConfig;
use crate::error::SearchError;

/// Realistic desktop browser User-Agent strings, one chosen per client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Build a [`reqwest::Client`] configured for backend scraping.
///
/// The client has:
/// - Per-request timeout from config
/// - Random User-Agent from the built-in rotation list (or custom if configured)
/// - Browser-like `Accept` / `Accept-Language` headers
/// - No cookie store, default redirect following
///
/// # Errors
///
/// Returns [`SearchError::Coordination`] if the client cannot be constructed,
/// since nothing can be dispatched without one.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml"),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Coordination(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // USER_AGENTS is a non-empty const array, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}

/// Send `request` and return the body as text.
///
/// `label` names the backend (or "content") in error messages.
///
/// # Errors
///
/// - [`SearchError::Fetch`] if the request fails, times out, returns a
///   non-success status, or the body cannot be read.
/// - [`SearchError::Parse`] if the response declares a content type that is
///   not a text/markup document.
pub async fn fetch_markup(
    request: reqwest::RequestBuilder,
    label: &str,
) -> Result<String, SearchError> {
    let response = request
        .send()
        .await
        .map_err(|e| SearchError::Fetch(format!("{label} request failed: {e}")))?
        .error_for_status()
        .map_err(|e| SearchError::Fetch(format!("{label} HTTP error: {e}")))?;

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    if !is_markup_content_type(content_type.as_deref()) {
        return Err(SearchError::Parse(format!(
            "{label} response is not a text document ({})",
            content_type.unwrap_or_default()
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| SearchError::Fetch(format!("{label} response read failed: {e}")))?;

    tracing::trace!(label, bytes = body.len(), "response received");
    Ok(body)
}

/// Whether a `Content-Type` value describes something we can parse as
/// markup. A missing header is given the benefit of the doubt.
pub(crate) fn is_markup_content_type(content_type: Option<&str>) -> bool {
    let Some(value) = content_type else {
        return true;
    };
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime.is_empty() || mime.starts_with("text/") || mime.contains("html") || mime.contains("xml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_user_agent_returns_valid_ua() {
        let ua = random_user_agent();
        assert!(USER_AGENTS.contains(&ua));
        assert!(ua.contains("Mozilla/5.0"));
    }

    #[test]
    fn build_client_with_default_config() {
        assert!(build_client(&SearchConfig::default()).is_ok());
    }

    #[test]
    fn build_client_with_custom_ua() {
        let config = SearchConfig {
            user_agent: Some("CustomBot/1.0".into()),
            ..Default::default()
        };
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn markup_content_types_accepted() {
        assert!(is_markup_content_type(None));
        assert!(is_markup_content_type(Some("text/html; charset=utf-8")));
        assert!(is_markup_content_type(Some("text/plain")));
        assert!(is_markup_content_type(Some("application/xhtml+xml")));
        assert!(is_markup_content_type(Some("TEXT/HTML")));
    }

    #[test]
    fn binary_content_types_rejected() {
        assert!(!is_markup_content_type(Some("image/png")));
        assert!(!is_markup_content_type(Some("application/octet-stream")));
        assert!(!is_markup_content_type(Some("application/pdf")));
    }
}
