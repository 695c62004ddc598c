//! The exclusion computer: for each upcoming campaign, finds the recent
//! campaigns whose naming key contains its merchant id and records them as
//! the segments to exclude from its audience.
//!
//! The record set is treated as an immutable snapshot: every row's exclusion
//! text is derived from the snapshot's `start_date`/`naming_key`/`identifier`
//! alone, so the result does not depend on computation order and recomputing
//! on the same snapshot is idempotent.
//!
//! Matching is a deliberate substring test, unanchored and case-sensitive,
//! with no tokenization. A merchant id that happens to be a substring of an
//! unrelated naming key therefore matches; that is how the source base is
//! named and must not be "fixed" here.

use chrono::{Duration, NaiveDate};
use segex_core::{CampaignRow, Channel};

/// Parameters fixed for one computation pass.
///
/// `today` is captured once when the pass starts and never re-read, so a run
/// that straddles midnight still uses a single stable window.
#[derive(Debug, Clone, Copy)]
pub struct ExclusionPass {
    pub today: NaiveDate,
    pub lookback_days: i64,
}

impl ExclusionPass {
    #[must_use]
    pub fn new(today: NaiveDate, lookback_days: i64) -> Self {
        Self {
            today,
            lookback_days,
        }
    }
}

/// Populates `exclusions` on every row of a single-channel snapshot.
///
/// A row is eligible when its start date is today or later; eligible rows
/// collect, in snapshot order, every other row whose start date falls in
/// `[start - lookback, start)` and whose naming key contains this row's
/// identifier. The half-open window means a row never matches itself, even
/// when another row shares its exact start date. Matched naming keys are
/// rendered per `channel` (Push appends its segment suffix) and joined with
/// newlines; no deduplication, no cap.
///
/// Ineligible rows get an empty `exclusions`. An empty identifier is a
/// substring of every naming key and so matches the entire window; that is
/// accepted behavior, not guarded against.
///
/// Rows whose start date does not parse are logged and skipped: they are
/// neither eligible nor usable as match candidates, but they stay in the
/// output (with empty `exclusions`) so the table remains a complete snapshot.
#[must_use]
pub fn compute_exclusions(
    mut rows: Vec<CampaignRow>,
    pass: &ExclusionPass,
    channel: Channel,
) -> Vec<CampaignRow> {
    // Parse every start date once, up front, into a read-only side table.
    let dates: Vec<Option<NaiveDate>> = rows
        .iter()
        .map(|row| match row.parsed_start_date() {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::warn!(
                    record_id = %row.record_id,
                    start_date = %row.start_date,
                    error = %e,
                    "skipping row with unparseable start date"
                );
                None
            }
        })
        .collect();

    let lookback = Duration::days(pass.lookback_days);

    // Derive all exclusion strings from the snapshot before mutating any row.
    let computed: Vec<String> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let Some(start) = dates[idx] else {
                return String::new();
            };
            if start < pass.today {
                return String::new();
            }

            let window_start = start - lookback;
            let mut entries = Vec::new();
            for (other_idx, other) in rows.iter().enumerate() {
                let Some(other_start) = dates[other_idx] else {
                    continue;
                };
                // Inclusive lower bound, exclusive upper bound. The exclusive
                // upper bound is also what keeps a row from matching itself.
                if other_start >= window_start
                    && other_start < start
                    && other.naming_key.contains(row.identifier.as_str())
                {
                    entries.push(channel.exclusion_entry(&other.naming_key));
                }
            }
            entries.join("\n")
        })
        .collect();

    for (row, text) in rows.iter_mut().zip(computed) {
        row.exclusions = text;
    }
    rows
}

#[cfg(test)]
#[path = "exclusion_test.rs"]
mod exclusion_test;
