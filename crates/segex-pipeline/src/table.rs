//! CSV snapshots of campaign tables.
//!
//! Each pipeline stage can persist its output as a CSV table headed by the
//! backend's display names, so intermediate state is inspectable and the
//! `compute`/`push` subcommands can run from a file instead of a live fetch.
//! Reading validates the required headers first; a table missing one is
//! abandoned with [`PipelineError::MissingColumn`].

use std::path::Path;

use segex_core::{columns, CampaignRow};

use crate::error::PipelineError;

/// Headers a table must carry to be processable. The exclusions column is
/// not required on read — it is what the pipeline adds.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    columns::RECORD_ID,
    columns::START_DATE,
    columns::NAMING_KEY,
    columns::IDENTIFIER,
];

/// Reads a campaign table, validating required headers before any row is
/// deserialized.
///
/// # Errors
///
/// - [`PipelineError::MissingColumn`] if a required header is absent.
/// - [`PipelineError::Csv`] if the file cannot be opened or a row does not
///   deserialize.
pub fn read_table(path: &Path) -> Result<Vec<CampaignRow>, PipelineError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(PipelineError::MissingColumn {
                column: column.to_owned(),
            });
        }
    }

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Writes a campaign table with all five columns.
///
/// Values containing newlines (the exclusion text) are quoted by the CSV
/// writer, so multi-entry exclusion lists survive a round trip.
///
/// # Errors
///
/// Returns [`PipelineError::Csv`] or [`PipelineError::Io`] if the file
/// cannot be written.
pub fn write_table(path: &Path, rows: &[CampaignRow]) -> Result<(), PipelineError> {
    let mut writer = csv::Writer::from_path(path)?;

    if rows.is_empty() {
        // serialize() only emits headers alongside the first row; write them
        // explicitly so an empty table is still a valid, readable snapshot.
        writer.write_record([
            columns::RECORD_ID,
            columns::START_DATE,
            columns::NAMING_KEY,
            columns::IDENTIFIER,
            columns::EXCLUSIONS,
        ])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, exclusions: &str) -> CampaignRow {
        CampaignRow {
            record_id: id.to_owned(),
            start_date: "2025-06-15".to_owned(),
            naming_key: "Merchant123_Campaign".to_owned(),
            identifier: "123".to_owned(),
            exclusions: exclusions.to_owned(),
        }
    }

    #[test]
    fn write_then_read_round_trips_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("email_records.csv");

        let rows = vec![row("A", ""), row("B", "SegmentX")];
        write_table(&path, &rows).unwrap();

        let read_back = read_table(&path).unwrap();
        assert_eq!(read_back, rows);
    }

    #[test]
    fn newlines_in_exclusions_survive_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("push_records.csv");

        let rows = vec![row("A", "SegmentX\nSegmentY\nSegmentZ")];
        write_table(&path, &rows).unwrap();

        let read_back = read_table(&path).unwrap();
        assert_eq!(read_back[0].exclusions, "SegmentX\nSegmentY\nSegmentZ");
    }

    #[test]
    fn empty_table_round_trips_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_table(&path, &[]).unwrap();
        let read_back = read_table(&path).unwrap();
        assert!(read_back.is_empty());
    }

    #[test]
    fn missing_required_column_abandons_the_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        // No "Merchant IDs" column.
        std::fs::write(
            &path,
            "Record ID,Start date,Customer.io naming convention\nrecA,2025-06-15,Merchant123_Campaign\n",
        )
        .unwrap();

        let err = read_table(&path).unwrap_err();
        assert!(
            matches!(err, PipelineError::MissingColumn { ref column } if column == "Merchant IDs")
        );
    }

    #[test]
    fn missing_exclusions_column_is_tolerated_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        std::fs::write(
            &path,
            "Record ID,Start date,Customer.io naming convention,Merchant IDs\nrecA,2025-06-15,Merchant123_Campaign,123\n",
        )
        .unwrap();

        let rows = read_table(&path).unwrap();
        assert_eq!(rows[0].record_id, "recA");
        assert_eq!(rows[0].exclusions, "");
    }

    #[test]
    fn extra_columns_are_ignored_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.csv");
        std::fs::write(
            &path,
            "Record ID,Start date,Customer.io naming convention,Merchant IDs,Channel\nrecA,2025-06-15,Merchant123_Campaign,123,Email\n",
        )
        .unwrap();

        let rows = read_table(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].identifier, "123");
    }
}
