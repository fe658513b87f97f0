//! Qmamu search.
//!
//! Qmamu serves Google-style result markup, so it shares Google's block,
//! title, and snippet markers.

use super::{LinkRewrite, SourceDescriptor};
use crate::types::SourceId;

/// Qmamu request and markup description.
pub const DESCRIPTOR: SourceDescriptor = SourceDescriptor {
    source: SourceId::Qmamu,
    endpoint: "https://qmamu.com/search",
    query_param: "q",
    count_param: Some("num"),
    result_selector: ".tF2Cxc",
    title_selector: "h3",
    link_selector: "a",
    description_selector: ".IsZvec",
    link_rewrite: LinkRewrite::None,
};
