//! Campaign domain types shared across the pipeline stages.
//!
//! A [`CampaignRow`] is one campaign as exported from the Airtable base. The
//! serde renames map struct fields to the base's display names, which are
//! also the headers of the CSV snapshots written between stages.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used by the `Start date` column: ISO `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Airtable display names for the columns the pipeline reads and writes.
///
/// These double as CSV headers for stage snapshots.
pub mod columns {
    pub const RECORD_ID: &str = "Record ID";
    pub const START_DATE: &str = "Start date";
    pub const NAMING_KEY: &str = "Customer.io naming convention";
    pub const IDENTIFIER: &str = "Merchant IDs";
    pub const CHANNEL: &str = "Channel";
    pub const EXCLUSIONS: &str = "Segments to exclude";
}

/// One campaign record as it flows through the pipeline.
///
/// `start_date` is kept as the raw string from the backend; the exclusion
/// computer parses it and decides what to do with rows that fail to parse.
/// `exclusions` is empty until the exclusion computer populates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignRow {
    #[serde(rename = "Record ID")]
    pub record_id: String,
    #[serde(rename = "Start date")]
    pub start_date: String,
    #[serde(rename = "Customer.io naming convention")]
    pub naming_key: String,
    #[serde(rename = "Merchant IDs")]
    pub identifier: String,
    #[serde(rename = "Segments to exclude", default)]
    pub exclusions: String,
}

impl CampaignRow {
    /// Parses the raw `start_date` string as an ISO date.
    ///
    /// # Errors
    ///
    /// Returns the underlying `chrono` error if the string is empty or not
    /// in `YYYY-MM-DD` form.
    pub fn parsed_start_date(&self) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(&self.start_date, DATE_FORMAT)
    }
}

/// Messaging channel a campaign belongs to.
///
/// Both channels run the identical exclusion algorithm; they differ only in
/// how a matched naming key is recorded — Push appends a fixed suffix so the
/// stored entry names the Push-specific segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Email,
    Push,
}

/// Suffix appended to matched naming keys for the Push channel.
pub const PUSH_SEGMENT_SUFFIX: &str = "_Push_SDK_Version";

impl Channel {
    /// The channel value as stored in the backend's `Channel` field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Email => "Email",
            Channel::Push => "Push",
        }
    }

    /// Parses a channel name, accepting the backend's capitalized form and
    /// the lowercase form used on the command line.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Email" | "email" => Some(Channel::Email),
            "Push" | "push" => Some(Channel::Push),
            _ => None,
        }
    }

    /// Renders a matched naming key as the exclusion entry for this channel.
    #[must_use]
    pub fn exclusion_entry(self, naming_key: &str) -> String {
        match self {
            Channel::Email => naming_key.to_owned(),
            Channel::Push => format!("{naming_key}{PUSH_SEGMENT_SUFFIX}"),
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_start_date_accepts_iso_dates() {
        let row = CampaignRow {
            record_id: "recA".to_owned(),
            start_date: "2025-03-14".to_owned(),
            naming_key: "Merchant123_Campaign".to_owned(),
            identifier: "123".to_owned(),
            exclusions: String::new(),
        };
        let date = row.parsed_start_date().unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }

    #[test]
    fn parsed_start_date_rejects_empty_string() {
        let row = CampaignRow {
            record_id: "recA".to_owned(),
            start_date: String::new(),
            naming_key: String::new(),
            identifier: String::new(),
            exclusions: String::new(),
        };
        assert!(row.parsed_start_date().is_err());
    }

    #[test]
    fn parsed_start_date_rejects_non_iso_format() {
        let row = CampaignRow {
            record_id: "recA".to_owned(),
            start_date: "14/03/2025".to_owned(),
            naming_key: String::new(),
            identifier: String::new(),
            exclusions: String::new(),
        };
        assert!(row.parsed_start_date().is_err());
    }

    #[test]
    fn channel_parse_accepts_both_cases() {
        assert_eq!(Channel::parse("Email"), Some(Channel::Email));
        assert_eq!(Channel::parse("email"), Some(Channel::Email));
        assert_eq!(Channel::parse("Push"), Some(Channel::Push));
        assert_eq!(Channel::parse("push"), Some(Channel::Push));
        assert_eq!(Channel::parse("SMS"), None);
    }

    #[test]
    fn email_exclusion_entry_is_the_naming_key_verbatim() {
        assert_eq!(
            Channel::Email.exclusion_entry("Merchant123_Campaign"),
            "Merchant123_Campaign"
        );
    }

    #[test]
    fn push_exclusion_entry_appends_the_sdk_suffix() {
        assert_eq!(
            Channel::Push.exclusion_entry("Merchant123_Campaign"),
            "Merchant123_Campaign_Push_SDK_Version"
        );
    }

    #[test]
    fn campaign_row_serde_uses_display_names() {
        let row = CampaignRow {
            record_id: "recA".to_owned(),
            start_date: "2025-03-14".to_owned(),
            naming_key: "Merchant123_Campaign".to_owned(),
            identifier: "123".to_owned(),
            exclusions: String::new(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["Record ID"], "recA");
        assert_eq!(json["Start date"], "2025-03-14");
        assert_eq!(json["Customer.io naming convention"], "Merchant123_Campaign");
        assert_eq!(json["Merchant IDs"], "123");
        assert_eq!(json["Segments to exclude"], "");
    }
}
