/// Airtable field ids for the columns the pipeline touches.
///
/// The backend is addressed by field id (stable across column renames); the
/// display names in [`crate::campaign::columns`] are what the API returns as
/// JSON keys. Modeled as explicit configuration rather than process-wide
/// constants so a different base can be targeted per environment.
#[derive(Debug, Clone)]
pub struct FieldMap {
    /// `Customer.io naming convention` field id.
    pub naming_key: String,
    /// `Channel` field id.
    pub channel: String,
    /// `Merchant IDs` field id.
    pub identifier: String,
    /// `Start date` field id.
    pub start_date: String,
    /// `Segments to exclude` field id (write-back target).
    pub exclusions: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub airtable_api_key: String,
    pub airtable_base_id: String,
    pub airtable_table_id: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// Length of the exclusion lookback window, in days.
    pub lookback_days: i64,
    /// How many days before today the fetch window starts.
    pub fetch_past_days: i64,
    /// How many days after today the fetch window ends.
    pub fetch_future_days: i64,
    pub fields: FieldMap,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("airtable_api_key", &"[redacted]")
            .field("airtable_base_id", &self.airtable_base_id)
            .field("airtable_table_id", &self.airtable_table_id)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("lookback_days", &self.lookback_days)
            .field("fetch_past_days", &self.fetch_past_days)
            .field("fetch_future_days", &self.fetch_future_days)
            .field("fields", &self.fields)
            .finish()
    }
}
