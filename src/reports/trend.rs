//! Trend report
//!
//! Income and expense per time bucket (the trend chart). Buckets are keyed
//! by their chronological value and kept in a `BTreeMap`, so the series is
//! always in calendar order and never depends on a formatted label.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use crate::error::TrackerResult;
use crate::models::{BucketKey, EntryType, Granularity, Money, RecordFilter, TransactionRecord};

use super::quality::DataQuality;
use super::register::filter_records;

/// Totals for one bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub bucket: BucketKey,
    pub income: Money,
    pub expense: Money,
}

impl TrendPoint {
    /// Income minus expense for the bucket
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// A sparse, chronologically ordered series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSeries {
    pub granularity: Granularity,
    pub points: Vec<TrendPoint>,
    /// Records left out because their date cannot be resolved
    pub unresolved: usize,
    /// Records left out because their type is unrecognized
    pub unrecognized: usize,
}

/// Bucket records by date and sum income/expense per bucket
///
/// Empty buckets are omitted.
pub fn compute_time_series<'a, I>(records: I, granularity: Granularity) -> TimeSeries
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut buckets: BTreeMap<BucketKey, (Money, Money)> = BTreeMap::new();
    let mut unresolved = 0;
    let mut unrecognized = 0;

    for record in records {
        let Some(date) = record.date() else {
            unresolved += 1;
            continue;
        };
        let Some(entry_type) = record.entry_type() else {
            unrecognized += 1;
            continue;
        };

        let (income, expense) = buckets
            .entry(granularity.bucket(date))
            .or_insert((Money::zero(), Money::zero()));
        match entry_type {
            EntryType::Income => *income += record.amount,
            EntryType::Expense => *expense += record.amount,
        }
    }

    TimeSeries {
        granularity,
        points: buckets
            .into_iter()
            .map(|(bucket, (income, expense))| TrendPoint {
                bucket,
                income,
                expense,
            })
            .collect(),
        unresolved,
        unrecognized,
    }
}

/// Trend report over one filtered view
#[derive(Debug, Clone, Serialize)]
pub struct TrendReport {
    pub filter: RecordFilter,
    pub series: TimeSeries,
    pub quality: DataQuality,
}

impl TrendReport {
    /// Generate a trend report
    pub fn generate(
        records: &[TransactionRecord],
        filter: &RecordFilter,
        granularity: Granularity,
    ) -> Self {
        let outcome = filter_records(records, filter);
        let mut quality = DataQuality::for_view(records, &outcome);
        let series = compute_time_series(outcome.records, granularity);

        // An unfiltered month still cannot place these in a bucket
        quality.excluded_unresolved += series.unresolved;

        Self {
            filter: *filter,
            series,
            quality,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Trend by {} ({})\n",
            self.series.granularity, self.filter
        ));
        output.push_str(&"=".repeat(64));
        output.push('\n');

        if self.series.points.is_empty() {
            output.push_str("No transactions found.\n");
        } else {
            output.push_str(&format!(
                "{:<12} {:>16} {:>16} {:>16}\n",
                "Period", "Income", "Expense", "Net"
            ));
            output.push_str(&"-".repeat(64));
            output.push('\n');

            for point in &self.series.points {
                output.push_str(&format!(
                    "{:<12} {:>16} {:>16} {:>16}\n",
                    point.bucket.to_string(),
                    point.income.format_with_symbol(currency),
                    point.expense.format_with_symbol(currency),
                    point.net().format_with_symbol(currency)
                ));
            }
        }

        output.push_str(&self.quality.format_footer());
        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> TrackerResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["Period", "Start", "Income", "Expense", "Net"])?;

        for point in &self.series.points {
            wtr.write_record([
                point.bucket.to_string(),
                point
                    .bucket
                    .start_date()
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
                point.income.to_string(),
                point.expense.to_string(),
                point.net().to_string(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}
