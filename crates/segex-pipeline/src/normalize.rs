//! Row cleanup between fetch and exclusion computation.
//!
//! Two concerns: rows whose identifier holds several comma-separated merchant
//! ids are dropped (the exclusion computer only handles single-token
//! identifiers), and stray list formatting around the identifier is stripped.

use segex_core::CampaignRow;

/// Strips list formatting (`[`, `]`, `'`) and surrounding whitespace from a
/// raw identifier value.
#[must_use]
pub fn clean_identifier(raw: &str) -> String {
    raw.replace(['[', ']', '\''], "").trim().to_owned()
}

/// Drops multi-identifier rows and cleans the identifier on the rest.
///
/// Rows are dropped when the identifier contains a comma; each drop is
/// logged. Empty identifiers pass through — the exclusion computer has
/// defined (if aggressive) behavior for them.
#[must_use]
pub fn normalize_rows(rows: Vec<CampaignRow>) -> Vec<CampaignRow> {
    rows.into_iter()
        .filter(|row| {
            if row.identifier.contains(',') {
                tracing::info!(
                    record_id = %row.record_id,
                    identifier = %row.identifier,
                    "dropping row with multiple merchant ids"
                );
                false
            } else {
                true
            }
        })
        .map(|mut row| {
            row.identifier = clean_identifier(&row.identifier);
            row
        })
        .collect()
}
