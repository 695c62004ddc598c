//! Full pipeline: fetch, normalize, compute, push — both channels, in memory.

use std::path::Path;

use segex_core::{AppConfig, Channel};

pub(crate) async fn run_pipeline(
    config: &AppConfig,
    snapshot_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let client = crate::fetch::build_client(config)?;

    // One timestamp for the whole pass: the eligibility predicate and every
    // lookback window derive from this date, so a run that straddles midnight
    // still computes against a stable "today".
    let today = chrono::Local::now().date_naive();

    let tables = crate::fetch::fetch_window(&client, config, today).await;

    if let Some(dir) = snapshot_dir {
        std::fs::create_dir_all(dir)?;
        segex_pipeline::write_table(
            &dir.join(crate::fetch::raw_table_name(Channel::Email)),
            &tables.email,
        )?;
        segex_pipeline::write_table(
            &dir.join(crate::fetch::raw_table_name(Channel::Push)),
            &tables.push,
        )?;
    }

    for (channel, rows) in [(Channel::Email, tables.email), (Channel::Push, tables.push)] {
        let computed = crate::compute::compute_channel(rows, config, today, channel);

        if let Some(dir) = snapshot_dir {
            let name = format!(
                "{}_records_with_segments.csv",
                channel.as_str().to_lowercase()
            );
            segex_pipeline::write_table(&dir.join(name), &computed)?;
        }

        let totals = crate::push::push_rows(&client, config, &computed).await;
        tracing::info!(
            channel = %channel,
            updated = totals.updated,
            failed = totals.failed,
            skipped = totals.skipped,
            "channel complete"
        );
    }

    Ok(())
}
