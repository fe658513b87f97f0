//! DuckDuckGo HTML frontend. The most scraper-friendly backend.
//!
//! Uses the HTML-only frontend, which requires no JavaScript and is
//! tolerant of automated requests. Result links are wrapped in
//! `//duckduckgo.com/l/?uddg=<target>` redirects; the descriptor unwraps
//! them.

use super::{LinkRewrite, SourceDescriptor};
use crate::types::SourceId;

/// DuckDuckGo request and markup description.
pub const DESCRIPTOR: SourceDescriptor = SourceDescriptor {
    source: SourceId::DuckDuckGo,
    endpoint: "https://html.duckduckgo.com/html/",
    query_param: "q",
    count_param: None,
    result_selector: ".result:not(.result--ad)",
    title_selector: "a.result__a",
    link_selector: "a.result__a",
    description_selector: ".result__snippet",
    link_rewrite: LinkRewrite::DuckDuckGoRedirect,
};
