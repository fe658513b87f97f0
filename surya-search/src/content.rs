//! On-demand content extraction for a single result URL.
//!
//! A deliberately small heuristic: the first `<article>`/`<main>` region,
//! else the first `div.content`, else [`CONTENT_FALLBACK`]. It is not a
//! general readability algorithm and will miss content on many pages.

use scraper::{ElementRef, Html, Node, Selector};

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::http;
use crate::types::CONTENT_FALLBACK;

/// Content regions tried in priority order. A group like `"article, main"`
/// picks whichever comes first in the document.
const CONTENT_SELECTORS: &[&str] = &["article, main", "div.content"];

/// Elements whose text is never part of readable content.
const INVISIBLE_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Fetch `url` and return its main text, or [`CONTENT_FALLBACK`] when no
/// content region is recognised or the response is not a text document.
///
/// # Errors
///
/// Returns [`SearchError::Fetch`] if the page cannot be fetched (network
/// failure, timeout, non-success status), and [`SearchError::Config`] for
/// an unusable config.
pub async fn extract_content(url: &str, config: &SearchConfig) -> Result<String> {
    config.validate_extraction()?;
    let client = http::build_client(config)?;

    tracing::trace!(url, "content fetch");
    match http::fetch_markup(client.get(url), "content").await {
        Ok(html) => Ok(extract_text(&html, config.max_content_chars)),
        Err(SearchError::Parse(reason)) => {
            tracing::debug!(reason, "content is not markup, using fallback");
            Ok(CONTENT_FALLBACK.to_owned())
        }
        Err(e) => Err(e),
    }
}

/// Extract readable text from raw HTML, capped at `max_chars`.
///
/// Returns [`CONTENT_FALLBACK`] if no content region has any visible text.
pub fn extract_text(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);

    for css in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };
        if let Some(region) = document.select(&selector).next() {
            let text = normalise_whitespace(&visible_text(region));
            if !text.is_empty() {
                return truncate_to_limit(&text, max_chars);
            }
        }
    }

    CONTENT_FALLBACK.to_owned()
}

/// Text nodes under `region`, skipping script-like elements.
fn visible_text(region: ElementRef<'_>) -> String {
    let mut parts = Vec::new();
    for node in region.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|el| INVISIBLE_TAGS.contains(&el.name()))
        });
        if !hidden {
            let text: &str = text;
            parts.push(text);
        }
    }
    parts.join(" ")
}

/// Collapse runs of spaces and tabs within each line and keep at most one
/// blank line between paragraphs.
fn normalise_whitespace(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in text.lines() {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        let previous_blank = lines.last().is_some_and(String::is_empty);
        if line.is_empty() && (lines.is_empty() || previous_blank) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines.join("\n")
}

/// Cut `text` to at most `max_chars` characters, marking the cut.
fn truncate_to_limit(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_owned(),
        Some((end, _)) => format!("{}\n\n[Content truncated]", &text[..end]),
    }
}
