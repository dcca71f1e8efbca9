//! Category breakdown
//!
//! Per-category totals for one direction (the pie chart), and the
//! income-versus-expense overview pair.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::display::{format_bar, format_percentage, truncate};
use crate::error::TrackerResult;
use crate::models::{EntryType, Money, RecordFilter, TransactionRecord};

use super::quality::DataQuality;
use super::register::filter_records;
use super::summary::compute_summary;

/// One slice of a breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    pub count: usize,
    /// Share of the breakdown's total, 0-100
    pub percentage: f64,
}

/// Group records of one direction by category, summing amounts
///
/// Rows come out in first-occurrence order; blank categories fall under the
/// sentinel category. Records of the other direction (or an unrecognized
/// type) are ignored.
pub fn compute_category_breakdown<'a, I>(records: I, entry_type: EntryType) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut rows: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        if record.entry_type() != Some(entry_type) {
            continue;
        }
        let label = record.category_label();
        let slot = *index.entry(label.to_string()).or_insert_with(|| {
            rows.push(CategoryTotal {
                category: label.to_string(),
                total: Money::zero(),
                count: 0,
                percentage: 0.0,
            });
            rows.len() - 1
        });
        rows[slot].total += record.amount;
        rows[slot].count += 1;
    }

    let grand_total: Money = rows.iter().map(|r| r.total).sum();
    for row in &mut rows {
        row.percentage = row.total.percentage_of(grand_total);
    }
    rows
}

/// Which breakdown to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakdownKind {
    Income,
    #[default]
    Expense,
    /// Income total against expense total
    Overview,
}

impl fmt::Display for BreakdownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
            Self::Overview => write!(f, "overview"),
        }
    }
}

impl FromStr for BreakdownKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "overview" | "all" => Ok(Self::Overview),
            other => Err(format!(
                "Invalid breakdown: {}. Use income, expense or overview",
                other
            )),
        }
    }
}

/// Breakdown report over one filtered view
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownReport {
    pub filter: RecordFilter,
    pub kind: BreakdownKind,
    pub rows: Vec<CategoryTotal>,
    pub total: Money,
    pub quality: DataQuality,
}

impl BreakdownReport {
    /// Generate a breakdown
    ///
    /// The filter's month applies; its type is ignored because the kind
    /// already selects the direction.
    pub fn generate(records: &[TransactionRecord], filter: &RecordFilter, kind: BreakdownKind) -> Self {
        let month_only = RecordFilter {
            month: filter.month,
            ..RecordFilter::default()
        };
        let outcome = filter_records(records, &month_only);
        let quality = DataQuality::for_view(records, &outcome);

        let rows = match kind {
            BreakdownKind::Income => compute_category_breakdown(outcome.records, EntryType::Income),
            BreakdownKind::Expense => compute_category_breakdown(outcome.records, EntryType::Expense),
            BreakdownKind::Overview => overview_pair(records, &month_only),
        };
        let total: Money = rows.iter().map(|r| r.total).sum();

        Self {
            filter: month_only,
            kind,
            rows,
            total,
            quality,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        let title = match self.kind {
            BreakdownKind::Income => "Income by Category",
            BreakdownKind::Expense => "Expenses by Category",
            BreakdownKind::Overview => "Income vs Expense",
        };
        output.push_str(&format!("{} (month: {})\n", title, self.filter.month));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No transactions found.\n");
        } else {
            output.push_str(&format!(
                "{:<24} {:>14} {:>6} {:>6}\n",
                "Category", "Amount", "Count", "%"
            ));
            output.push_str(&"-".repeat(60));
            output.push('\n');

            for row in &self.rows {
                output.push_str(&format!(
                    "{:<24} {:>14} {:>6} {:>6} {}\n",
                    truncate(&row.category, 24),
                    row.total.format_with_symbol(currency),
                    row.count,
                    format_percentage(row.percentage),
                    format_bar(row.percentage, 100.0, 10)
                ));
            }

            output.push_str(&"-".repeat(60));
            output.push('\n');
            output.push_str(&format!(
                "{:<24} {:>14}\n",
                "TOTAL",
                self.total.format_with_symbol(currency)
            ));
        }

        output.push_str(&self.quality.format_footer());
        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> TrackerResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["Month", "Breakdown", "Category", "Amount", "Count", "Percentage"])?;

        for row in &self.rows {
            wtr.write_record([
                self.filter.month.to_string(),
                self.kind.to_string(),
                row.category.clone(),
                row.total.to_string(),
                row.count.to_string(),
                format!("{:.2}", row.percentage),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}

/// Income total against expense total, as two breakdown rows
pub fn overview_pair(records: &[TransactionRecord], filter: &RecordFilter) -> Vec<CategoryTotal> {
    let summary = compute_summary(records, filter);
    let outcome = filter_records(records, filter);
    let count_of = |entry_type| {
        outcome
            .records
            .iter()
            .filter(|r| r.entry_type() == Some(entry_type))
            .count()
    };

    let grand_total = summary.total_income + summary.total_expense;
    [EntryType::Income, EntryType::Expense]
        .into_iter()
        .map(|entry_type| {
            let total = summary.total_for(entry_type);
            CategoryTotal {
                category: entry_type.to_string(),
                total,
                count: count_of(entry_type),
                percentage: total.percentage_of(grand_total),
            }
        })
        .collect()
}
