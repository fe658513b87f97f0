//! Yep search (Ahrefs' independent index), web vertical.

use super::{LinkRewrite, SourceDescriptor};
use crate::types::SourceId;

/// Yep request and markup description.
pub const DESCRIPTOR: SourceDescriptor = SourceDescriptor {
    source: SourceId::Yep,
    endpoint: "https://yep.com/web",
    query_param: "q",
    count_param: Some("num"),
    result_selector: ".tF2Cxc",
    title_selector: "h3",
    link_selector: "a",
    description_selector: ".IsZvec",
    link_rewrite: LinkRewrite::None,
};
