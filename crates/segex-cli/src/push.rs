//! Sink stage: write computed exclusion lists back to Airtable.
//!
//! Only rows that actually gained exclusion text are pushed. A failed update
//! is logged and skipped, never retried — one bad record must not abort the
//! batch.

use std::path::Path;

use segex_airtable::AirtableClient;
use segex_core::{AppConfig, CampaignRow};

pub(crate) struct PushTotals {
    pub updated: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// PATCHes each row's exclusion text into the configured field by record id.
pub(crate) async fn push_rows(
    client: &AirtableClient,
    config: &AppConfig,
    rows: &[CampaignRow],
) -> PushTotals {
    let mut totals = PushTotals {
        updated: 0,
        failed: 0,
        skipped: 0,
    };

    for row in rows {
        if row.exclusions.trim().is_empty() {
            totals.skipped += 1;
            continue;
        }
        match client
            .update_record(&row.record_id, &config.fields.exclusions, &row.exclusions)
            .await
        {
            Ok(()) => {
                tracing::info!(record_id = %row.record_id, "updated record");
                totals.updated += 1;
            }
            Err(e) => {
                tracing::warn!(
                    record_id = %row.record_id,
                    error = %e,
                    "skipping record — update failed"
                );
                totals.failed += 1;
            }
        }
    }

    totals
}

pub(crate) async fn run_push(config: &AppConfig, input: &Path) -> anyhow::Result<()> {
    let rows = segex_pipeline::read_table(input)?;
    let client = crate::fetch::build_client(config)?;

    let totals = push_rows(&client, config, &rows).await;
    tracing::info!(
        updated = totals.updated,
        failed = totals.failed,
        skipped = totals.skipped,
        "push complete"
    );
    Ok(())
}
