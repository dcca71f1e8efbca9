//! Record display formatting
//!
//! Tables and detail views for transaction records.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{TransactionRecord, SUGGESTED_CATEGORIES};

use super::report::truncate;

/// Placeholder shown for a date that cannot be read
const UNKNOWN_DATE: &str = "??????????";

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl RecordRow {
    fn new(record: &TransactionRecord, currency: &str) -> Self {
        let amount = match record.signed_amount() {
            Some(signed) if signed.is_positive() => {
                format!("+{}", signed.format_with_symbol(currency))
            }
            Some(signed) => signed.format_with_symbol(currency),
            None => record.amount.format_with_symbol(currency),
        };

        Self {
            date: format_record_date(record),
            title: truncate(&record.title, 28),
            kind: record.kind.to_string(),
            category: record.category_label().to_string(),
            amount,
            id: record.id.to_string(),
        }
    }
}

/// Resolved date, or a placeholder
pub fn format_record_date(record: &TransactionRecord) -> String {
    record
        .date()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

/// Format records as a table
pub fn format_record_table(records: &[TransactionRecord], currency: &str) -> String {
    if records.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = records.iter().map(|r| RecordRow::new(r, currency));
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()));
    table.to_string()
}

/// Format one record for display
pub fn format_record_details(record: &TransactionRecord, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", record.id));
    output.push_str(&format!("Title:       {}\n", record.title));
    output.push_str(&format!("Date:        {}\n", format_record_date(record)));
    output.push_str(&format!(
        "Amount:      {}\n",
        record.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!("Type:        {}\n", record.kind));
    output.push_str(&format!("Category:    {}\n", record.category_label()));

    output
}

/// Format the suggested categories, marking ones already in use
pub fn format_category_list(in_use: &[String]) -> String {
    let mut output = String::from("Suggested categories:\n");

    for category in SUGGESTED_CATEGORIES {
        let marker = if in_use.iter().any(|c| c.eq_ignore_ascii_case(category)) {
            "*"
        } else {
            " "
        };
        output.push_str(&format!("  {} {}\n", marker, category));
    }

    let custom: Vec<&String> = in_use
        .iter()
        .filter(|c| !crate::models::category::is_suggested(c))
        .collect();
    if !custom.is_empty() {
        output.push_str("\nOther categories in use:\n");
        for category in custom {
            output.push_str(&format!("  * {}\n", category));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryType, Money, RawDate};
    use chrono::NaiveDate;

    fn record() -> TransactionRecord {
        TransactionRecord::new(
            "doc-1",
            "uid-1",
            "Groceries",
            Money::from_cents(4000),
            EntryType::Expense,
            "Food & Dining",
            NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
        )
    }

    #[test]
    fn test_record_table() {
        let income = TransactionRecord::new(
            "doc-2",
            "uid-1",
            "Salary",
            Money::from_cents(100000),
            EntryType::Income,
            "Salary",
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        );
        let table = format_record_table(&[record(), income], "₹");

        assert!(table.contains("Groceries"));
        assert!(table.contains("-₹40.00"));
        assert!(table.contains("+₹1000.00"));
        assert!(table.contains("2025-01-20"));
    }

    #[test]
    fn test_unknown_date_placeholder() {
        let bad = record().with_raw_date(RawDate::Text("N/A".into()));
        assert_eq!(format_record_date(&bad), UNKNOWN_DATE);
        assert!(format_record_details(&bad, "$").contains("Amount:      $40.00"));
    }

    #[test]
    fn test_category_list_marks_usage() {
        let text = format_category_list(&["shopping".to_string(), "Pets".to_string()]);
        assert!(text.contains("* Shopping"));
        assert!(text.contains("Other categories in use:\n  * Pets"));
    }
}
