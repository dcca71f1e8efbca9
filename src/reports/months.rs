//! Months with activity (the dashboard's month picker)

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use crate::error::TrackerResult;
use crate::models::{MonthKey, TransactionRecord};

use super::quality::{count_unresolved, DataQuality};

/// Distinct months of resolvable records, newest first
pub fn available_months<'a, I>(records: I) -> Vec<MonthKey>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    month_counts(records).into_iter().map(|(month, _)| month).collect()
}

/// Record count per month, newest first
fn month_counts<'a, I>(records: I) -> Vec<(MonthKey, usize)>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut counts: BTreeMap<MonthKey, usize> = BTreeMap::new();
    for date in records.into_iter().filter_map(|r| r.date()) {
        *counts.entry(MonthKey::of(date)).or_default() += 1;
    }
    counts.into_iter().rev().collect()
}

/// One row of the month picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthEntry {
    pub month: MonthKey,
    pub label: String,
    pub count: usize,
}

/// Months report
#[derive(Debug, Clone, Serialize)]
pub struct MonthsReport {
    pub months: Vec<MonthEntry>,
    pub quality: DataQuality,
}

impl MonthsReport {
    /// Generate the month list
    pub fn generate(records: &[TransactionRecord]) -> Self {
        let months = month_counts(records)
            .into_iter()
            .map(|(month, count)| MonthEntry {
                month,
                label: month.long_label(),
                count,
            })
            .collect();

        let unresolved = count_unresolved(records);
        Self {
            months,
            quality: DataQuality {
                unresolved_dates: unresolved,
                excluded_unresolved: unresolved,
                ..DataQuality::default()
            },
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Months\n");
        output.push_str(&"=".repeat(32));
        output.push('\n');

        if self.months.is_empty() {
            output.push_str("No transactions found.\n");
        }
        for entry in &self.months {
            output.push_str(&format!(
                "{:<8} {:<16} {:>5}\n",
                entry.month.to_string(),
                entry.label,
                entry.count
            ));
        }

        output.push_str(&self.quality.format_footer());
        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> TrackerResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["Month", "Label", "Transactions"])?;
        for entry in &self.months {
            wtr.write_record([entry.month.to_string(), entry.label.clone(), entry.count.to_string()])?;
        }
        wtr.flush()?;
        Ok(())
    }
}
