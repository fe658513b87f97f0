//! Search backend implementations.
//!
//! Every backend is a [`SourceDescriptor`]: an endpoint plus the CSS
//! selectors that locate result blocks and their title, link, and
//! description. One generic adapter, [`ScrapeAdapter`], consumes any
//! descriptor, so a backend changing its markup is a one-line fix in its
//! own module.

pub mod bing;
pub mod duckduckgo;
pub mod google;
pub mod qmamu;
pub mod yep;
pub mod you;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::config::SearchConfig;
use crate::engine::SourceAdapter;
use crate::error::SearchError;
use crate::http;
use crate::types::{ResultRecord, SourceId};

/// Declarative description of one backend's request and markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceDescriptor {
    /// Which source this describes.
    pub source: SourceId,
    /// Base URL the query is sent to with a GET request.
    pub endpoint: &'static str,
    /// Query-string parameter carrying the search terms.
    pub query_param: &'static str,
    /// Query-string parameter requesting a result count, if the backend has one.
    pub count_param: Option<&'static str>,
    /// Selector for one candidate result block.
    pub result_selector: &'static str,
    /// Selector (within a block) whose text is the title.
    pub title_selector: &'static str,
    /// Selector (within a block) whose `href` is the link.
    pub link_selector: &'static str,
    /// Selector (within a block) whose text is the description.
    pub description_selector: &'static str,
    /// How raw `href` values are turned into result URLs.
    pub link_rewrite: LinkRewrite,
}

/// Post-processing applied to a scraped `href`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRewrite {
    /// Use the `href` verbatim.
    None,
    /// Unwrap `//duckduckgo.com/l/?uddg=<target>` redirect links.
    DuckDuckGoRedirect,
    /// Unwrap `/url?q=<target>` redirect links.
    GoogleRedirect,
}

impl LinkRewrite {
    /// Rewrite `href`. Links that are not a recognised wrapper, or that
    /// cannot be unwrapped, are returned unchanged.
    pub fn apply(&self, href: &str) -> String {
        let unwrapped = match self {
            Self::None => None,
            Self::DuckDuckGoRedirect => unwrap_redirect(href, "duckduckgo.com", "/l/", &["uddg"]),
            Self::GoogleRedirect => unwrap_redirect(href, "www.google.com", "/url", &["q", "url"]),
        };
        unwrapped.unwrap_or_else(|| href.to_owned())
    }
}

/// Extract the target URL from a redirect wrapper.
///
/// Relative (`/url?...`) and protocol-relative (`//host/...`) hrefs are
/// resolved against `https://{host}` first.
fn unwrap_redirect(href: &str, host: &str, path_prefix: &str, params: &[&str]) -> Option<String> {
    let base = Url::parse(&format!("https://{host}/")).ok()?;
    let parsed = base.join(href).ok()?;

    let bare = host.trim_start_matches("www.");
    let host_matches = parsed.host_str().is_some_and(|h| {
        let h = h.trim_start_matches("www.");
        h == bare || h.ends_with(&format!(".{bare}"))
    });
    if !host_matches || !parsed.path().starts_with(path_prefix) {
        return None;
    }

    parsed
        .query_pairs()
        .find(|(key, _)| params.contains(&key.as_ref()))
        .map(|(_, value)| value.into_owned())
        .filter(|target| !target.is_empty())
}

/// Look up the built-in descriptor for a source.
pub fn descriptor(source: SourceId) -> &'static SourceDescriptor {
    match source {
        SourceId::Google => &google::DESCRIPTOR,
        SourceId::Bing => &bing::DESCRIPTOR,
        SourceId::DuckDuckGo => &duckduckgo::DESCRIPTOR,
        SourceId::Qmamu => &qmamu::DESCRIPTOR,
        SourceId::Yep => &yep::DESCRIPTOR,
        SourceId::You => &you::DESCRIPTOR,
    }
}

/// Result count requested from backends that take a count parameter when
/// no per-source cap is configured. Only a hint; parsing keeps every
/// complete candidate.
pub const REQUESTED_COUNT: usize = 10;

/// The one adapter used for every built-in backend.
#[derive(Debug, Clone)]
pub struct ScrapeAdapter {
    descriptor: &'static SourceDescriptor,
    endpoint: String,
    client: reqwest::Client,
    max_results: Option<usize>,
}

impl ScrapeAdapter {
    /// Build the adapter for `source`, honouring any endpoint override in
    /// `config`. `client` is shared by every adapter of one aggregation.
    pub fn for_source(source: SourceId, client: reqwest::Client, config: &SearchConfig) -> Self {
        let descriptor = descriptor(source);
        let endpoint = config
            .endpoint_overrides
            .get(&source)
            .cloned()
            .unwrap_or_else(|| descriptor.endpoint.to_owned());
        Self {
            descriptor,
            endpoint,
            client,
            max_results: config.max_results_per_source,
        }
    }

    /// The URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SourceAdapter for ScrapeAdapter {
    async fn fetch(&self, query: &str) -> Result<Vec<ResultRecord>, SearchError> {
        let source = self.descriptor.source;
        tracing::trace!(query, %source, "source fetch");

        let mut params = vec![(self.descriptor.query_param, query.to_owned())];
        if let Some(count_param) = self.descriptor.count_param {
            let count = self.max_results.unwrap_or(REQUESTED_COUNT);
            params.push((count_param, count.to_string()));
        }

        let request = self.client.get(&self.endpoint).query(&params);
        let html = http::fetch_markup(request, source.name()).await?;

        parse_results(self.descriptor, &html, self.max_results)
    }

    fn source(&self) -> SourceId {
        self.descriptor.source
    }
}

/// Parse a backend's HTML into result records using its descriptor.
///
/// Candidates missing a title, link, or description are skipped. Markup
/// that matches nothing yields an empty vector, not an error. With
/// `max_results` of `None` every complete candidate is kept.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] only if a descriptor selector is invalid.
pub fn parse_results(
    descriptor: &SourceDescriptor,
    html: &str,
    max_results: Option<usize>,
) -> Result<Vec<ResultRecord>, SearchError> {
    let document = Html::parse_document(html);

    let result_sel = selector(descriptor.result_selector, "result")?;
    let title_sel = selector(descriptor.title_selector, "title")?;
    let link_sel = selector(descriptor.link_selector, "link")?;
    let description_sel = selector(descriptor.description_selector, "description")?;

    let mut results = Vec::new();

    for block in document.select(&result_sel) {
        let Some(title) = first_text(block, &title_sel) else {
            continue;
        };

        let href = block
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|h| !h.is_empty());
        let Some(href) = href else {
            continue;
        };

        let Some(description) = first_text(block, &description_sel) else {
            continue;
        };

        results.push(ResultRecord {
            title,
            url: descriptor.link_rewrite.apply(href),
            description,
            source: descriptor.source,
        });

        if max_results.is_some_and(|max| results.len() >= max) {
            break;
        }
    }

    tracing::debug!(source = %descriptor.source, count = results.len(), "results parsed");
    Ok(results)
}

fn selector(css: &str, what: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("invalid {what} selector: {e:?}")))
}

/// Whitespace-collapsed text of the first match, or `None` if there is no
/// match or its text is blank.
fn first_text(block: ElementRef<'_>, sel: &Selector) -> Option<String> {
    let el = block.select(sel).next()?;
    let text = el
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    (!text.is_empty()).then_some(text)
}
