//! Export and report output
//!
//! - Reports render as a terminal table, JSON, YAML or CSV
//! - An owner's full record set exports as JSON, YAML or CSV

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_records_csv;
pub use json::{export_owner_json, ExportMetadata, OwnerExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_owner_yaml;

use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

use crate::error::TrackerResult;
use crate::reports::{BreakdownReport, MonthsReport, RegisterReport, Summary, TrendReport};

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON (amounts in minor units)
    Json,
    /// YAML (amounts in minor units)
    Yaml,
    /// CSV
    Csv,
}

/// A report that can be written in every output format
pub trait Report: Serialize {
    /// Terminal rendering
    fn render_table(&self, currency: &str) -> String;

    /// CSV rendering
    fn render_csv(&self, writer: &mut dyn Write) -> TrackerResult<()>;
}

macro_rules! impl_report {
    ($($report:ty),* $(,)?) => {
        $(
            impl Report for $report {
                fn render_table(&self, currency: &str) -> String {
                    self.format_terminal(currency)
                }

                fn render_csv(&self, writer: &mut dyn Write) -> TrackerResult<()> {
                    self.export_csv(writer)
                }
            }
        )*
    };
}

impl_report!(Summary, BreakdownReport, TrendReport, RegisterReport);

impl Report for MonthsReport {
    fn render_table(&self, _currency: &str) -> String {
        self.format_terminal()
    }

    fn render_csv(&self, writer: &mut dyn Write) -> TrackerResult<()> {
        self.export_csv(writer)
    }
}

/// Write a report in the requested format
pub fn write_report<R: Report>(
    report: &R,
    format: OutputFormat,
    currency: &str,
    writer: &mut dyn Write,
) -> TrackerResult<()> {
    match format {
        OutputFormat::Table => writer.write_all(report.render_table(currency).as_bytes())?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, report)?;
            writeln!(writer)?;
        }
        OutputFormat::Yaml => serde_yaml::to_writer(&mut *writer, report)?,
        OutputFormat::Csv => report.render_csv(writer)?,
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryType, Money, RecordFilter, TransactionRecord};
    use crate::reports::compute_summary;
    use chrono::NaiveDate;

    fn summary() -> Summary {
        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let records = vec![TransactionRecord::new(
            "a",
            "uid-1",
            "Pay",
            Money::from_cents(10000),
            EntryType::Income,
            "Salary",
            day,
        )];
        compute_summary(&records, &RecordFilter::new())
    }

    fn render(format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        write_report(&summary(), format, "$", &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_every_format() {
        assert!(render(OutputFormat::Table).contains("$100.00"));

        let json: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        assert_eq!(json["total_income"], 10000);
        assert_eq!(json["filter"]["type"], "all");

        assert!(render(OutputFormat::Yaml).contains("total_income: 10000"));
        assert!(render(OutputFormat::Csv).starts_with("Type Filter,Month,Income"));
    }
}
