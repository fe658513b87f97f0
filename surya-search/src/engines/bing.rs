//! Bing web search. A decent fallback with its own index.
//!
//! Organic results are `li.b_algo` blocks; the link lives on the `<h2>`
//! anchor (the first anchor in a block is often the site favicon link).

use super::{LinkRewrite, SourceDescriptor};
use crate::types::SourceId;

/// Bing request and markup description.
pub const DESCRIPTOR: SourceDescriptor = SourceDescriptor {
    source: SourceId::Bing,
    endpoint: "https://www.bing.com/search",
    query_param: "q",
    count_param: Some("num"),
    result_selector: ".b_algo",
    title_selector: "h2",
    link_selector: "h2 a",
    description_selector: ".b_caption p, .b_lineclamp2",
    link_rewrite: LinkRewrite::None,
};
