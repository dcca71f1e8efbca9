//! Summary report
//!
//! Income, expense and balance over the filtered records: the dashboard's
//! summary cards.

use serde::Serialize;
use std::io::Write;

use crate::error::TrackerResult;
use crate::models::{EntryType, Money, RecordFilter, TransactionRecord};

use super::quality::DataQuality;
use super::register::filter_records;

/// Totals over one filtered view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub filter: RecordFilter,
    pub total_income: Money,
    pub total_expense: Money,
    /// `total_income - total_expense`, may be negative
    pub balance: Money,
    /// Records that passed the filter (including unrecognized types)
    pub record_count: usize,
    pub quality: DataQuality,
}

/// Compute income/expense/balance totals over the records passing `filter`
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use expense_tracker::models::{EntryType, Money, RecordFilter, TransactionRecord};
/// use expense_tracker::reports::compute_summary;
///
/// let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// let records = vec![
///     TransactionRecord::new("a", "u", "Pay", Money::from_cents(10000), EntryType::Income, "Salary", day),
///     TransactionRecord::new("b", "u", "Rent", Money::from_cents(12500), EntryType::Expense, "Bills & Utilities", day),
/// ];
/// let summary = compute_summary(&records, &RecordFilter::new());
/// assert_eq!(summary.balance, Money::from_cents(-2500));
/// ```
pub fn compute_summary(records: &[TransactionRecord], filter: &RecordFilter) -> Summary {
    let outcome = filter_records(records, filter);
    let quality = DataQuality::for_view(records, &outcome);

    let mut total_income = Money::zero();
    let mut total_expense = Money::zero();
    for record in &outcome.records {
        match record.entry_type() {
            Some(EntryType::Income) => total_income += record.amount,
            Some(EntryType::Expense) => total_expense += record.amount,
            None => {}
        }
    }

    Summary {
        filter: *filter,
        total_income,
        total_expense,
        balance: total_income - total_expense,
        record_count: outcome.records.len(),
        quality,
    }
}

impl Summary {
    /// Total for one direction
    pub fn total_for(&self, entry_type: EntryType) -> Money {
        match entry_type {
            EntryType::Income => self.total_income,
            EntryType::Expense => self.total_expense,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Summary ({})\n", self.filter));
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>20}\n",
            "Total Income:",
            self.total_income.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<16} {:>20}\n",
            "Total Expense:",
            self.total_expense.format_with_symbol(currency)
        ));
        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>20}\n",
            "Balance:",
            self.balance.format_with_symbol(currency)
        ));
        output.push_str(&format!("{:<16} {:>20}\n", "Transactions:", self.record_count));

        output.push_str(&self.quality.format_footer());
        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> TrackerResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["Type Filter", "Month", "Income", "Expense", "Balance", "Transactions"])?;
        wtr.write_record([
            self.filter.entry_type.to_string(),
            self.filter.month.to_string(),
            self.total_income.to_string(),
            self.total_expense.to_string(),
            self.balance.to_string(),
            self.record_count.to_string(),
        ])?;
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonthKey, RawDate, RecordKind, TypeFilter};
    use chrono::NaiveDate;

    fn record(id: &str, entry_type: EntryType, cents: i64, y: i32, m: u32, d: u32) -> TransactionRecord {
        TransactionRecord::new(
            id,
            "uid-1",
            id,
            Money::from_cents(cents),
            entry_type,
            "Other",
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        )
    }

    fn scenario() -> Vec<TransactionRecord> {
        vec![
            record("a", EntryType::Income, 10000, 2025, 1, 15),
            record("b", EntryType::Expense, 4000, 2025, 1, 20),
            record("c", EntryType::Expense, 6000, 2025, 2, 1),
        ]
    }

    #[test]
    fn test_scenario_totals() {
        let summary = compute_summary(&scenario(), &RecordFilter::new());
        assert_eq!(summary.total_income, Money::from_cents(10000));
        assert_eq!(summary.total_expense, Money::from_cents(10000));
        assert_eq!(summary.balance, Money::zero());
        assert!(summary.quality.is_clean());
    }

    #[test]
    fn test_unresolved_date_kept_in_unfiltered_totals_only() {
        let mut records = scenario();
        records.push(
            record("d", EntryType::Expense, 2500, 2025, 1, 1)
                .with_raw_date(RawDate::Text("N/A".into())),
        );

        let unfiltered = compute_summary(&records, &RecordFilter::new());
        assert_eq!(unfiltered.total_expense, Money::from_cents(12500));
        assert_eq!(unfiltered.quality.unresolved_dates, 1);
        assert_eq!(unfiltered.quality.excluded_unresolved, 0);

        let january = RecordFilter::new().month(MonthKey::new(2025, 1).unwrap());
        let filtered = compute_summary(&records, &january);
        assert_eq!(filtered.total_income, Money::from_cents(10000));
        assert_eq!(filtered.total_expense, Money::from_cents(4000));
        assert_eq!(filtered.quality.excluded_unresolved, 1);
    }

    #[test]
    fn test_balance_invariant_and_order_independence() {
        let mut records = Vec::new();
        for i in 0..50i64 {
            let entry_type = if i % 3 == 0 { EntryType::Income } else { EntryType::Expense };
            records.push(record(&format!("r{}", i), entry_type, i * 137 + 1, 2025, (i % 12 + 1) as u32, 1));
        }

        let forward = compute_summary(&records, &RecordFilter::new());
        assert_eq!(forward.total_income - forward.total_expense, forward.balance);

        records.reverse();
        let backward = compute_summary(&records, &RecordFilter::new());
        assert_eq!(forward.total_income, backward.total_income);
        assert_eq!(forward.total_expense, backward.total_expense);
        assert_eq!(forward.balance, backward.balance);
    }

    #[test]
    fn test_extreme_totals_saturate() {
        let near_max = i64::MAX - 10;
        let records = vec![
            record("a", EntryType::Income, near_max, 2025, 1, 1),
            record("b", EntryType::Income, near_max, 2025, 1, 2),
            record("c", EntryType::Expense, near_max, 2025, 1, 3),
        ];

        let summary = compute_summary(&records, &RecordFilter::new());
        assert_eq!(summary.total_income.cents(), i64::MAX);
        assert_eq!(summary.total_expense.cents(), near_max);
        assert_eq!(summary.balance.cents(), 10);
        assert_eq!(summary.record_count, 3);
    }

    #[test]
    fn test_unrecognized_type_excluded_and_reported() {
        let mut records = scenario();
        records.push(
            record("x", EntryType::Income, 99999, 2025, 1, 3)
                .with_kind(RecordKind::Unrecognized("Income".into())),
        );

        let summary = compute_summary(&records, &RecordFilter::new());
        assert_eq!(summary.total_income, Money::from_cents(10000));
        assert_eq!(summary.record_count, 4);
        assert_eq!(summary.quality.unrecognized_types, 1);

        let income_only = RecordFilter::new().entry_type(TypeFilter::Income);
        let summary = compute_summary(&records, &income_only);
        assert_eq!(summary.total_expense, Money::zero());
        assert_eq!(summary.quality.unrecognized_types, 0);
    }

    #[test]
    fn test_format_and_export() {
        let summary = compute_summary(&scenario(), &RecordFilter::new());
        let text = summary.format_terminal("₹");
        assert!(text.contains("₹100.00"));
        assert!(!text.contains("Data quality"));

        let mut buffer = Vec::new();
        summary.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert!(csv.contains("all,all,100.00,100.00,0.00,3"));
    }
}
