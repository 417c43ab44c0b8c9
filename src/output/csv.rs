//! CSV report writer

use chrono::NaiveDate;
use csv::Writer;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

use super::{OutputError, OutputResult};
use crate::report::ReportRow;

/// Report file name: stamped with the run date, suffixed with the output
/// name when given, otherwise with the effective date range when one was
/// requested.
pub fn report_file_name(
    today: NaiveDate,
    output_name: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> String {
    let base = match (output_name, start_date, end_date) {
        (Some(name), _, _) => format!("user_metrics_{name}"),
        (None, Some(start), Some(end)) => format!("user_metrics_{start}_to_{end}"),
        _ => "user_metrics".to_string(),
    };
    format!("{}_{base}.csv", today.format("%Y-%m-%d"))
}

/// Write the report rows. The header row comes from the row type's field
/// order; absent optional fields render as empty cells.
pub fn write_report(path: &Path, rows: &[ReportRow]) -> OutputResult<()> {
    let file = File::create(path)
        .map_err(|e| OutputError::Io(format!("failed to create {}: {e}", path.display())))?;
    let mut writer = Writer::from_writer(BufWriter::new(file));

    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| OutputError::Csv(format!("failed to write row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| OutputError::Csv(format!("failed to flush report: {e}")))?;

    info!("CSV file created: {}", path.display());
    Ok(())
}
