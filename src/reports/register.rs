//! Transaction register
//!
//! Filtered listings of one owner's records: the dashboard's recent list,
//! the full transaction list and its category filter.

use serde::Serialize;
use std::collections::HashSet;
use std::io::Write;

use crate::error::TrackerResult;
use crate::models::{MonthMatch, RecordFilter, TransactionRecord};

use super::quality::DataQuality;

/// Records that passed a filter, plus what was dropped for bad dates
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome<'a> {
    pub records: Vec<&'a TransactionRecord>,
    /// Records of the selected type dropped because a specific month was
    /// selected and their date cannot be resolved
    pub excluded_unresolved: usize,
}

/// Apply type and month filters, keeping input order
pub fn filter_records<'a>(
    records: &'a [TransactionRecord],
    filter: &RecordFilter,
) -> FilterOutcome<'a> {
    let mut outcome = FilterOutcome::default();

    for record in records {
        if !filter.entry_type.matches(record) {
            continue;
        }
        match filter.month.check(record) {
            MonthMatch::Included => outcome.records.push(record),
            MonthMatch::OtherMonth => {}
            MonthMatch::UnresolvedDate => outcome.excluded_unresolved += 1,
        }
    }

    outcome
}

/// Newest records first, unresolvable dates last
pub fn recent_records<'a, I>(records: I, limit: usize) -> Vec<&'a TransactionRecord>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut sorted: Vec<&TransactionRecord> = records.into_iter().collect();
    // Stable: ties keep their stored order
    sorted.sort_by(|a, b| match (a.date(), b.date()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    sorted.truncate(limit);
    sorted
}

/// Records whose category label matches `category` (case-insensitive)
pub fn filter_by_category<'a, I>(records: I, category: &str) -> Vec<&'a TransactionRecord>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let wanted = category.trim();
    records
        .into_iter()
        .filter(|r| r.category_label().eq_ignore_ascii_case(wanted))
        .collect()
}

/// Distinct category labels in first-occurrence order
pub fn distinct_categories<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut seen = HashSet::new();
    records
        .into_iter()
        .map(|r| r.category_label())
        .filter(|label| seen.insert(label.to_string()))
        .map(str::to_string)
        .collect()
}

/// Register report: a filtered, optionally limited transaction list
#[derive(Debug, Clone, Serialize)]
pub struct RegisterReport {
    pub filter: RecordFilter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub entries: Vec<TransactionRecord>,
    pub quality: DataQuality,
}

impl RegisterReport {
    /// Generate a register listing in date order
    pub fn generate(
        records: &[TransactionRecord],
        filter: &RecordFilter,
        category: Option<&str>,
        limit: Option<usize>,
    ) -> Self {
        let outcome = filter_records(records, filter);
        let quality = DataQuality::for_view(records, &outcome);

        let mut selected = match category {
            Some(category) => filter_by_category(outcome.records, category),
            None => outcome.records,
        };
        if let Some(limit) = limit {
            // Keep the last `limit` entries in date order
            let skip = selected.len().saturating_sub(limit);
            selected.drain(..skip);
        }

        Self {
            filter: *filter,
            category: category.map(str::to_string),
            entries: selected.into_iter().cloned().collect(),
            quality,
        }
    }

    /// Generate the dashboard's recent list: newest first
    pub fn recent(records: &[TransactionRecord], limit: usize) -> Self {
        let filter = RecordFilter::new();
        let outcome = filter_records(records, &filter);
        let quality = DataQuality::for_view(records, &outcome);

        Self {
            filter,
            category: None,
            entries: recent_records(outcome.records, limit)
                .into_iter()
                .cloned()
                .collect(),
            quality,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Transactions ({})\n", self.filter));
        if let Some(category) = &self.category {
            output.push_str(&format!("Category: {}\n", category));
        }
        output.push_str(&"=".repeat(80));
        output.push('\n');

        if self.entries.is_empty() {
            output.push_str("No transactions found.\n");
        } else {
            output.push_str(&crate::display::format_record_table(&self.entries, currency));
            output.push('\n');
        }

        output.push_str(&self.quality.format_footer());
        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> TrackerResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["ID", "Date", "Title", "Type", "Category", "Amount"])?;

        for record in &self.entries {
            wtr.write_record([
                record.id.to_string(),
                record.date().map(|d| d.to_string()).unwrap_or_default(),
                record.title.clone(),
                String::from(record.kind.clone()),
                record.category_label().to_string(),
                record.amount.to_string(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}
