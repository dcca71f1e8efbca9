//! CSV export of records (spreadsheet-compatible)

use std::io::Write;

use crate::error::TrackerResult;
use crate::models::TransactionRecord;

/// Write records as CSV, one row per record
///
/// `Date` is the resolved calendar date (blank when unreadable); `Raw Date`
/// is the stored value as JSON so nothing is lost.
pub fn export_records_csv<W: Write>(records: &[TransactionRecord], writer: W) -> TrackerResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["ID", "Date", "Raw Date", "Title", "Type", "Category", "Amount"])?;

    for record in records {
        wtr.write_record([
            record.id.to_string(),
            record.date().map(|d| d.to_string()).unwrap_or_default(),
            record.occurred_at.to_value().to_string(),
            record.title.clone(),
            String::from(record.kind.clone()),
            record.category.clone(),
            record.amount.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
