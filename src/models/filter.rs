//! Dashboard filters: transaction type and calendar month

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::month::MonthKey;
use super::record::{EntryType, TransactionRecord};

/// Type filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    /// Exact match on the record's type; `All` admits unrecognized types too
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        match self {
            Self::All => true,
            Self::Income => record.entry_type() == Some(EntryType::Income),
            Self::Expense => record.entry_type() == Some(EntryType::Expense),
        }
    }
}

impl From<EntryType> for TypeFilter {
    fn from(t: EntryType) -> Self {
        match t {
            EntryType::Income => Self::Income,
            EntryType::Expense => Self::Expense,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!(
                "Invalid type filter: {}. Use all, income or expense",
                other
            )),
        }
    }
}

/// Month filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthFilter {
    #[default]
    All,
    Month(MonthKey),
}

/// Outcome of applying a month filter to one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthMatch {
    Included,
    OtherMonth,
    /// A specific month was selected but the record's date cannot be resolved
    UnresolvedDate,
}

impl MonthFilter {
    /// Apply the filter
    ///
    /// `All` admits every record including those with unresolvable dates; a
    /// specific month never admits an unresolvable date.
    pub fn check(&self, record: &TransactionRecord) -> MonthMatch {
        match self {
            Self::All => MonthMatch::Included,
            Self::Month(key) => match record.date() {
                Some(date) if key.contains(date) => MonthMatch::Included,
                Some(_) => MonthMatch::OtherMonth,
                None => MonthMatch::UnresolvedDate,
            },
        }
    }

    /// Check whether the record passes
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        self.check(record) == MonthMatch::Included
    }

    /// Check whether a specific month is selected
    pub fn is_specific(&self) -> bool {
        matches!(self, Self::Month(_))
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Month(key) => write!(f, "{}", key),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            MonthKey::parse(s).map(Self::Month)
        }
    }
}

/// Active dashboard filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordFilter {
    #[serde(rename = "type")]
    pub entry_type: TypeFilter,
    pub month: MonthFilter,
}

impl RecordFilter {
    /// Create a filter that admits everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by type
    pub fn entry_type(mut self, entry_type: TypeFilter) -> Self {
        self.entry_type = entry_type;
        self
    }

    /// Filter by calendar month
    pub fn month(mut self, month: MonthKey) -> Self {
        self.month = MonthFilter::Month(month);
        self
    }

    /// Check whether a record passes both filters
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        self.entry_type.matches(record) && self.month.matches(record)
    }
}

impl fmt::Display for RecordFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type: {}, month: {}", self.entry_type, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RawDate, RecordKind};
    use chrono::NaiveDate;

    fn record(entry_type: EntryType, y: i32, m: u32, d: u32) -> TransactionRecord {
        TransactionRecord::new(
            "r",
            "u",
            "t",
            Money::from_cents(100),
            entry_type,
            "Other",
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        )
    }

    #[test]
    fn test_type_filter() {
        let income = record(EntryType::Income, 2025, 1, 1);
        let odd = income.clone().with_kind(RecordKind::Unrecognized("gift".into()));

        assert!(TypeFilter::All.matches(&income));
        assert!(TypeFilter::Income.matches(&income));
        assert!(!TypeFilter::Expense.matches(&income));
        assert!(TypeFilter::All.matches(&odd));
        assert!(!TypeFilter::Income.matches(&odd));
    }

    #[test]
    fn test_month_filter_compares_year_and_month() {
        let jan_2025 = record(EntryType::Expense, 2025, 1, 31);
        let jan_2024 = record(EntryType::Expense, 2024, 1, 31);
        let filter = MonthFilter::Month(MonthKey::new(2025, 1).unwrap());

        assert_eq!(filter.check(&jan_2025), MonthMatch::Included);
        assert_eq!(filter.check(&jan_2024), MonthMatch::OtherMonth);
    }

    #[test]
    fn test_unresolved_dates_fail_specific_month_only() {
        let bad = record(EntryType::Expense, 2025, 1, 1).with_raw_date(RawDate::Text("N/A".into()));
        let filter = MonthFilter::Month(MonthKey::new(2025, 1).unwrap());

        assert_eq!(filter.check(&bad), MonthMatch::UnresolvedDate);
        assert!(MonthFilter::All.matches(&bad));
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!("all".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!(
            "January 2025".parse::<MonthFilter>().unwrap(),
            MonthFilter::Month(MonthKey::new(2025, 1).unwrap())
        );
        assert_eq!("Expense".parse::<TypeFilter>().unwrap(), TypeFilter::Expense);
        assert!("both".parse::<TypeFilter>().is_err());
    }

    #[test]
    fn test_builder() {
        let filter = RecordFilter::new()
            .entry_type(TypeFilter::Income)
            .month(MonthKey::new(2025, 1).unwrap());
        assert!(filter.matches(&record(EntryType::Income, 2025, 1, 15)));
        assert!(!filter.matches(&record(EntryType::Expense, 2025, 1, 15)));
        assert_eq!(filter.to_string(), "type: income, month: 2025-01");
    }
}
