//! Fetch stage: day-by-day export of the campaign window from Airtable.
//!
//! The backend is queried one day at a time with an `IS_SAME` formula rather
//! than a single range query, matching how the base's views are filtered. A
//! day whose fetch fails is logged and left out of the snapshot — no retries.

use std::path::Path;

use chrono::{Duration, NaiveDate};
use segex_airtable::AirtableClient;
use segex_core::{columns, AppConfig, CampaignRow, Channel, DATE_FORMAT};

/// Per-channel campaign tables produced by the fetch stage.
pub(crate) struct ChannelTables {
    pub email: Vec<CampaignRow>,
    pub push: Vec<CampaignRow>,
}

pub(crate) fn build_client(config: &AppConfig) -> anyhow::Result<AirtableClient> {
    AirtableClient::new(
        &config.airtable_api_key,
        &config.airtable_base_id,
        &config.airtable_table_id,
        config.request_timeout_secs,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Airtable client: {e}"))
}

/// Airtable formula matching records starting on `day` with a known channel
/// and a non-empty identifier. Fields are addressed by id so the formula
/// survives column renames.
fn day_filter_formula(config: &AppConfig, day: NaiveDate) -> String {
    let date = day.format(DATE_FORMAT);
    format!(
        "AND(IS_SAME({{{start}}}, '{date}', 'day'), OR({{{channel}}} = 'Push', {{{channel}}} = 'Email'), {{{identifier}}} != '')",
        start = config.fields.start_date,
        channel = config.fields.channel,
        identifier = config.fields.identifier,
    )
}

/// Fetches every day in `[today - fetch_past_days, today + fetch_future_days]`
/// and splits the results by channel, preserving fetch order within each
/// channel.
pub(crate) async fn fetch_window(
    client: &AirtableClient,
    config: &AppConfig,
    today: NaiveDate,
) -> ChannelTables {
    let start = today - Duration::days(config.fetch_past_days);
    let end = today + Duration::days(config.fetch_future_days);

    let fields = [
        config.fields.naming_key.as_str(),
        config.fields.channel.as_str(),
        config.fields.identifier.as_str(),
        config.fields.start_date.as_str(),
    ];

    let mut tables = ChannelTables {
        email: Vec::new(),
        push: Vec::new(),
    };

    let mut day = start;
    while day <= end {
        let formula = day_filter_formula(config, day);
        match client.list_all(&formula, &fields).await {
            Ok(records) => {
                tracing::info!(date = %day, count = records.len(), "fetched records");
                for record in records {
                    let channel_value = record.field_text(columns::CHANNEL);
                    let Some(channel) = Channel::parse(&channel_value) else {
                        tracing::warn!(
                            record_id = %record.id,
                            channel = %channel_value,
                            "skipping record with unknown channel"
                        );
                        continue;
                    };
                    let row = CampaignRow {
                        start_date: record.field_text(columns::START_DATE),
                        naming_key: record.field_text(columns::NAMING_KEY),
                        identifier: record.field_text(columns::IDENTIFIER),
                        record_id: record.id,
                        exclusions: String::new(),
                    };
                    match channel {
                        Channel::Email => tables.email.push(row),
                        Channel::Push => tables.push.push(row),
                    }
                }
            }
            Err(e) => {
                tracing::warn!(date = %day, error = %e, "skipping day — fetch failed");
            }
        }
        day += Duration::days(1);
    }

    tables
}

/// File name for a channel's raw table snapshot.
pub(crate) fn raw_table_name(channel: Channel) -> String {
    format!("{}_records.csv", channel.as_str().to_lowercase())
}

pub(crate) async fn run_fetch(config: &AppConfig, out_dir: &Path) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let today = chrono::Local::now().date_naive();
    let tables = fetch_window(&client, config, today).await;

    std::fs::create_dir_all(out_dir)?;
    segex_pipeline::write_table(&out_dir.join(raw_table_name(Channel::Email)), &tables.email)?;
    segex_pipeline::write_table(&out_dir.join(raw_table_name(Channel::Push)), &tables.push)?;
    tracing::info!(
        email = tables.email.len(),
        push = tables.push.len(),
        out_dir = %out_dir.display(),
        "wrote per-channel tables"
    );
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_config() -> AppConfig {
    AppConfig {
        airtable_api_key: "test-key".to_owned(),
        airtable_base_id: "appBase".to_owned(),
        airtable_table_id: "tblCampaigns".to_owned(),
        log_level: "info".to_owned(),
        request_timeout_secs: 30,
        lookback_days: 30,
        fetch_past_days: 30,
        fetch_future_days: 7,
        fields: segex_core::FieldMap {
            naming_key: "fldNaming".to_owned(),
            channel: "fldChannel".to_owned(),
            identifier: "fldMerchant".to_owned(),
            start_date: "fldStart".to_owned(),
            exclusions: "fldExclusions".to_owned(),
        },
    }
}
