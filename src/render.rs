//! Plain-text rendering of search outcomes for terminal output.

use std::fmt::Write as _;

use surya_search::AggregationOutcome;

/// Render an outcome as the `web_info` line, numbered results, and a list of
/// failed sources.
pub fn outcome_text(outcome: &AggregationOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", outcome.web_info);

    if outcome.results.is_empty() {
        out.push_str("\nNo results.\n");
    }
    for (i, result) in outcome.results.iter().enumerate() {
        let _ = writeln!(out, "\n{}. {}", i + 1, result.title);
        let _ = writeln!(out, "   {}", result.url);
        let _ = writeln!(out, "   {}", result.description);
        let _ = writeln!(out, "   [{}]", result.source);
    }

    if !outcome.failures.is_empty() {
        out.push_str("\nFailed sources:\n");
        for (source, failure) in &outcome.failures {
            let _ = writeln!(out, "  - {source}: {failure}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use surya_search::{FailureKind, ResultRecord, SourceFailure, SourceId};

    use super::*;

    fn outcome(
        results: Vec<ResultRecord>,
        failures: BTreeMap<SourceId, SourceFailure>,
    ) -> AggregationOutcome {
        AggregationOutcome {
            results,
            failures,
            fetched_at: chrono::Local::now(),
            web_info: "Web results for 'rust' fetched on 2026-01-02 03:04:05.".into(),
        }
    }

    #[test]
    fn results_are_numbered_with_source() {
        let text = outcome_text(&outcome(
            vec![ResultRecord {
                title: "The Rust Book".into(),
                url: "https://doc.rust-lang.org/book/".into(),
                description: "Learn Rust.".into(),
                source: SourceId::DuckDuckGo,
            }],
            BTreeMap::new(),
        ));
        assert!(text.starts_with("Web results for 'rust'"));
        assert!(text.contains("1. The Rust Book"));
        assert!(text.contains("https://doc.rust-lang.org/book/"));
        assert!(text.contains("[DuckDuckGo]"));
        assert!(!text.contains("Failed sources"));
    }

    #[test]
    fn failures_are_listed() {
        let mut failures = BTreeMap::new();
        failures.insert(
            SourceId::Bing,
            SourceFailure {
                kind: FailureKind::Fetch,
                message: "bing HTTP error: 503".into(),
            },
        );
        let text = outcome_text(&outcome(vec![], failures));
        assert!(text.contains("No results."));
        assert!(text.contains("Failed sources:"));
        assert!(text.contains("Bing"));
        assert!(text.contains("503"));
    }
}
