//! Output persistence: fetched records as CSV, analysis results as JSON.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::report::format_money;
use crate::services::contributions_api::ContributionRecord;
use csv::WriterBuilder;
use std::fs::File;
use std::path::Path;

/// Number of rows shown by [`log_preview`].
pub const PREVIEW_ROWS: usize = 10;

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Writes `records` to `path` as CSV with a header row, replacing any
/// existing file.
pub fn write_records(path: &Path, records: &[ContributionRecord]) -> Result<()> {
    debug!(path = %path.display(), rows = records.len(), "Writing CSV");

    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes `value` to `path` as pretty-printed JSON.
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let body = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, body).with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}

/// Logs name, amount, state and zip of the first few records.
pub fn log_preview(records: &[ContributionRecord]) {
    for record in records.iter().take(PREVIEW_ROWS) {
        info!(
            contributor = %record.contributor_name,
            amount = %record
                .contribution_receipt_amount
                .map(format_money)
                .unwrap_or_default(),
            state = %record.contributor_state,
            zip = %record.contributor_zip,
            "Preview"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::Transaction;
    use crate::loader::read_rows;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    fn record(last: &str, amount: Option<f64>) -> ContributionRecord {
        ContributionRecord {
            committee_id: "C001".into(),
            committee_name: "WINRED".into(),
            contributor_name: format!("{last}, PAT"),
            contributor_last_name: last.into(),
            contributor_zip: "37027".into(),
            contribution_receipt_amount: amount,
            contribution_receipt_date: "2020-10-15T00:00:00".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&record("SMITH", None));
    }

    #[test]
    fn test_log_preview_does_not_panic() {
        let records: Vec<_> = (0..15).map(|i| record(&format!("N{i}"), Some(i as f64))).collect();
        log_preview(&records);
    }

    #[test]
    fn test_write_records_header_once_and_overwrites() {
        let path = temp_path("fec_party_rater_test_write.csv");
        let _ = fs::remove_file(&path);

        write_records(&path, &[record("SMITH", Some(1.0)), record("DOE", Some(2.0))]).unwrap();
        write_records(&path, &[record("JONES", Some(3.0))]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("committee_id,committee_name"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_written_records_load_as_transactions() {
        let path = temp_path("fec_party_rater_test_roundtrip.csv");
        let _ = fs::remove_file(&path);

        write_records(&path, &[record("SMITH", Some(250.0)), record("DOE", None)]).unwrap();

        let rows: Vec<Transaction> = read_rows(File::open(&path).unwrap()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].last_name, "SMITH");
        assert_eq!(rows[0].committee_name, "WINRED");
        assert_eq!(rows[1].amount, None);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_json() {
        let path = temp_path("fec_party_rater_test.json");
        let _ = fs::remove_file(&path);

        write_json(&path, &record("SMITH", Some(5.0))).unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["contributor_last_name"], "SMITH");

        fs::remove_file(&path).unwrap();
    }
}
