//! Compute stage: normalize a channel table and populate its exclusions.

use std::path::Path;

use chrono::NaiveDate;
use segex_core::{AppConfig, CampaignRow, Channel};
use segex_pipeline::{compute_exclusions, normalize_rows, ExclusionPass};

/// Runs normalize + exclusion computation over one channel's snapshot.
pub(crate) fn compute_channel(
    rows: Vec<CampaignRow>,
    config: &AppConfig,
    today: NaiveDate,
    channel: Channel,
) -> Vec<CampaignRow> {
    let rows = normalize_rows(rows);
    let pass = ExclusionPass::new(today, config.lookback_days);
    compute_exclusions(rows, &pass, channel)
}

pub(crate) fn run_compute(
    config: &AppConfig,
    channel: &str,
    input: &Path,
    output: &Path,
) -> anyhow::Result<()> {
    let channel = Channel::parse(channel)
        .ok_or_else(|| anyhow::anyhow!("unknown channel '{channel}'; expected 'email' or 'push'"))?;

    let rows = segex_pipeline::read_table(input)?;
    let today = chrono::Local::now().date_naive();
    let computed = compute_channel(rows, config, today, channel);

    segex_pipeline::write_table(output, &computed)?;
    tracing::info!(
        channel = %channel,
        rows = computed.len(),
        output = %output.display(),
        "wrote computed table"
    );
    Ok(())
}
