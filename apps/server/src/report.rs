//! # Weekly Sales Report
//!
//! Builds the CSV summary of the current week's sales.
//!
//! ## Report Shape
//! ```text
//! Sale ID,Date,Customer,Total
//! 550e8400-...,18/08/2026 09:15,Alice,21.98
//! 7c9e6679-...,19/08/2026 14:02,Bob,10.00
//! ,,,
//! ,,Grand Total,31.98
//! ```
//!
//! The week starts on Monday 00:00 local time. Totals come from the sale
//! line snapshots, so repricing an item after a sale never changes a past
//! report.
//!
//! The file is written to the configured reports directory AND returned to
//! the caller as a download; the on-disk copy is the audit trail.

use chrono::{DateTime, Datelike, Duration, Local, NaiveTime, TimeZone, Utc};
use std::fs;
use std::path::{Path, PathBuf};

use stockbook_core::Money;
use stockbook_db::SaleSummary;

/// Report generation errors.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to encode report: {0}")]
    Encode(String),

    #[error("Failed to write report file: {0}")]
    Io(#[from] std::io::Error),
}

/// A generated report: the suggested filename and the CSV bytes.
#[derive(Debug, Clone)]
pub struct ReportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Returns the start of the week containing `now`: Monday 00:00 in the
/// local timezone, expressed in UTC for querying.
pub fn week_start(now: DateTime<Local>) -> DateTime<Utc> {
    let today = now.date_naive();
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    let midnight = monday.and_time(NaiveTime::MIN);

    // DST can make a local midnight ambiguous or missing; fall back to
    // interpreting it as UTC rather than failing the report.
    match now.timezone().from_local_datetime(&midnight).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&midnight),
    }
}

/// Encodes sale summaries as the weekly report CSV.
///
/// One row per sale in chronological order, then a blank separator row and
/// a grand total row.
pub fn encode_csv(sales: &[SaleSummary]) -> Result<Vec<u8>, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["Sale ID", "Date", "Customer", "Total"])
        .map_err(|e| ReportError::Encode(e.to_string()))?;

    let mut grand_total = Money::zero();

    for sale in sales {
        let total = Money::from_cents(sale.total_cents);
        grand_total += total;

        writer
            .write_record([
                sale.sale_id.as_str(),
                &sale
                    .created_at
                    .with_timezone(&Local)
                    .format("%d/%m/%Y %H:%M")
                    .to_string(),
                sale.customer_name.as_str(),
                &total.to_decimal_string(),
            ])
            .map_err(|e| ReportError::Encode(e.to_string()))?;
    }

    writer
        .write_record(["", "", "", ""])
        .map_err(|e| ReportError::Encode(e.to_string()))?;
    writer
        .write_record(["", "", "Grand Total", &grand_total.to_decimal_string()])
        .map_err(|e| ReportError::Encode(e.to_string()))?;

    writer
        .into_inner()
        .map_err(|e| ReportError::Encode(e.to_string()))
}

/// Builds the weekly report and persists a copy under `reports_dir`.
///
/// The filename carries the generation date: `weekly_report_YYYYMMDD.csv`.
/// Generating twice on the same day overwrites the earlier copy.
pub fn generate(sales: &[SaleSummary], reports_dir: &Path) -> Result<ReportFile, ReportError> {
    let bytes = encode_csv(sales)?;
    let filename = format!("weekly_report_{}.csv", Local::now().format("%Y%m%d"));

    fs::create_dir_all(reports_dir)?;
    let path: PathBuf = reports_dir.join(&filename);
    fs::write(&path, &bytes)?;

    tracing::info!(path = %path.display(), sales = sales.len(), "Weekly report written");

    Ok(ReportFile { filename, bytes })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn summary(id: &str, at: DateTime<Utc>, customer: &str, cents: i64) -> SaleSummary {
        SaleSummary {
            sale_id: id.to_string(),
            created_at: at,
            customer_name: customer.to_string(),
            total_cents: cents,
        }
    }

    #[test]
    fn test_week_start_is_monday_midnight() {
        // Saturday 2026-08-22 -> Monday 2026-08-17
        let saturday = Local
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(2026, 8, 22)
                    .unwrap()
                    .and_hms_opt(15, 30, 0)
                    .unwrap(),
            )
            .unwrap();

        let start = week_start(saturday).with_timezone(&Local);
        assert_eq!(start.date_naive(), NaiveDate::from_ymd_opt(2026, 8, 17).unwrap());
        assert_eq!(start.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_week_start_on_monday_is_same_day() {
        let monday = Local
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(2026, 8, 17)
                    .unwrap()
                    .and_hms_opt(0, 5, 0)
                    .unwrap(),
            )
            .unwrap();

        let start = week_start(monday).with_timezone(&Local);
        assert_eq!(start.date_naive(), NaiveDate::from_ymd_opt(2026, 8, 17).unwrap());
    }

    #[test]
    fn test_encode_csv_rows_and_grand_total() {
        let at = Utc
            .with_ymd_and_hms(2026, 8, 18, 12, 15, 0)
            .single()
            .unwrap();
        let sales = vec![
            summary("sale-1", at, "Alice", 2198),
            summary("sale-2", at, "Bob", 1000),
        ];

        let bytes = encode_csv(&sales).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let rows: Vec<&str> = text.lines().collect();

        assert_eq!(rows[0], "Sale ID,Date,Customer,Total");
        assert!(rows[1].starts_with("sale-1,"));
        assert!(rows[1].ends_with(",Alice,21.98"));
        assert!(rows[2].ends_with(",Bob,10.00"));
        assert_eq!(rows[3], ",,,");
        assert_eq!(rows[4], ",,Grand Total,31.98");
    }

    #[test]
    fn test_encode_csv_empty_week() {
        let bytes = encode_csv(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let rows: Vec<&str> = text.lines().collect();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], ",,Grand Total,0.00");
    }

    #[test]
    fn test_generate_persists_file() {
        let dir = std::env::temp_dir().join("stockbook-report-test");
        let report = generate(&[], &dir).unwrap();

        assert!(report.filename.starts_with("weekly_report_"));
        assert!(report.filename.ends_with(".csv"));

        let on_disk = fs::read(dir.join(&report.filename)).unwrap();
        assert_eq!(on_disk, report.bytes);

        fs::remove_dir_all(&dir).unwrap();
    }
}
