//! Calendar month keys
//!
//! A `MonthKey` is a (year, month) pair. Ordering is chronological because
//! the year field is compared first; it never depends on a formatted label.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month, e.g. January 2025
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    /// Create a month key, validating the month number
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month a date falls in
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Check whether a date falls in this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Full English label, e.g. "January 2025"
    pub fn long_label(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }

    /// English month name
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month.clamp(1, 12) - 1) as usize]
    }

    /// Parse either "2025-01" or "January 2025" (month names are case-insensitive,
    /// three-letter abbreviations accepted)
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if let Some((year, month)) = s.split_once('-') {
            let year: i32 = year
                .parse()
                .map_err(|_| format!("Invalid year in month key: {}", s))?;
            let month: u32 = month
                .parse()
                .map_err(|_| format!("Invalid month in month key: {}", s))?;
            return Self::new(year, month).ok_or_else(|| format!("Month out of range: {}", s));
        }

        if let Some((name, year)) = s.split_once(' ') {
            let name = name.trim().to_lowercase();
            let month = MONTH_NAMES
                .iter()
                .position(|m| {
                    let m = m.to_lowercase();
                    m == name || (name.len() == 3 && m.starts_with(&name))
                })
                .ok_or_else(|| format!("Unknown month name: {}", s))?;
            let year: i32 = year
                .trim()
                .parse()
                .map_err(|_| format!("Invalid year in month key: {}", s))?;
            return Ok(Self {
                year,
                month: month as u32 + 1,
            });
        }

        Err(format!(
            "Invalid month: {}. Use YYYY-MM (e.g., 2025-01) or 'January 2025'",
            s
        ))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric() {
        let key = MonthKey::parse("2025-01").unwrap();
        assert_eq!(key, MonthKey { year: 2025, month: 1 });
        assert_eq!(key.to_string(), "2025-01");
        assert!(MonthKey::parse("2025-13").is_err());
        assert!(MonthKey::parse("2025-xx").is_err());
    }

    #[test]
    fn test_parse_long_label() {
        assert_eq!(
            MonthKey::parse("November 2025").unwrap(),
            MonthKey { year: 2025, month: 11 }
        );
        assert_eq!(
            MonthKey::parse("feb 2024").unwrap(),
            MonthKey { year: 2024, month: 2 }
        );
        assert!(MonthKey::parse("Smarch 2025").is_err());
        assert!(MonthKey::parse("whenever").is_err());
    }

    #[test]
    fn test_chronological_ordering() {
        let dec = MonthKey::new(2024, 12).unwrap();
        let jan = MonthKey::new(2025, 1).unwrap();
        let feb = MonthKey::new(2025, 2).unwrap();
        let nov = MonthKey::new(2025, 11).unwrap();
        let mut keys = vec![nov, jan, dec, feb];
        keys.sort();
        assert_eq!(keys, vec![dec, jan, feb, nov]);
    }

    #[test]
    fn test_contains_and_label() {
        let key = MonthKey::new(2025, 1).unwrap();
        assert!(key.contains(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()));
        assert!(!key.contains(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
        assert_eq!(key.long_label(), "January 2025");
    }
}
