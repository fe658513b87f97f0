//! Google web search. Best coverage, but aggressive bot detection.
//!
//! Organic results are `div.tF2Cxc` blocks with the title in an `<h3>`, the
//! link on the first anchor, and the snippet in `.IsZvec`. Without
//! JavaScript Google sometimes wraps links as `/url?q=<target>`, which the
//! descriptor unwraps.

use super::{LinkRewrite, SourceDescriptor};
use crate::types::SourceId;

/// Google request and markup description.
pub const DESCRIPTOR: SourceDescriptor = SourceDescriptor {
    source: SourceId::Google,
    endpoint: "https://www.google.com/search",
    query_param: "q",
    count_param: Some("num"),
    result_selector: ".tF2Cxc",
    title_selector: "h3",
    link_selector: "a",
    description_selector: ".IsZvec",
    link_rewrite: LinkRewrite::GoogleRedirect,
};
