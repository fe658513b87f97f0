//! Fan-in: reassemble per-source outcomes into one [`AggregationOutcome`].
//!
//! Outcomes arrive here already in configuration order, so concatenation
//! order never depends on which source finished first. No ranking and no
//! de-duplication happen here: the same URL from two sources stays as two
//! records.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};

use crate::types::{AggregationOutcome, ResultRecord, SourceFailure, SourceId};

/// Outcome of a single source, before merging.
pub type SourceOutcome = (SourceId, Result<Vec<ResultRecord>, SourceFailure>);

/// Build the outcome from per-source results given in configuration order.
///
/// Records with a blank title, URL, or description are dropped so the
/// outcome never carries a partial record, whatever the adapter emitted.
pub fn assemble(
    query: &str,
    fetched_at: DateTime<Local>,
    outcomes: Vec<SourceOutcome>,
) -> AggregationOutcome {
    let mut results = Vec::new();
    let mut failures = BTreeMap::new();

    for (source, outcome) in outcomes {
        match outcome {
            Ok(records) => {
                let total = records.len();
                let before = results.len();
                results.extend(records.into_iter().filter(is_complete_record));
                let kept = results.len() - before;
                if kept < total {
                    tracing::debug!(%source, dropped = total - kept, "dropped incomplete records");
                }
                tracing::debug!(%source, count = kept, "source returned results");
            }
            Err(failure) => {
                tracing::warn!(%source, error = %failure, "source query failed");
                failures.insert(source, failure);
            }
        }
    }

    tracing::debug!(
        results = results.len(),
        failed = failures.len(),
        "aggregation complete"
    );

    AggregationOutcome {
        results,
        failures,
        web_info: web_info(query, &fetched_at),
        fetched_at,
    }
}

/// Display-only summary line naming the query and when it was fetched.
pub fn web_info(query: &str, fetched_at: &DateTime<Local>) -> String {
    format!(
        "Web results for '{query}' fetched on {}.",
        fetched_at.format("%Y-%m-%d %H:%M:%S")
    )
}

fn is_complete_record(record: &ResultRecord) -> bool {
    !record.title.trim().is_empty()
        && !record.url.trim().is_empty()
        && !record.description.trim().is_empty()
}
