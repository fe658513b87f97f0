//! You.com search.

use super::{LinkRewrite, SourceDescriptor};
use crate::types::SourceId;

/// You.com request and markup description.
pub const DESCRIPTOR: SourceDescriptor = SourceDescriptor {
    source: SourceId::You,
    endpoint: "https://you.com/search",
    query_param: "q",
    count_param: Some("num"),
    result_selector: ".tF2Cxc",
    title_selector: "h3",
    link_selector: "a",
    description_selector: ".IsZvec",
    link_rewrite: LinkRewrite::None,
};
