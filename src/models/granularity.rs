//! Time-bucket granularity for trend series

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::month::MonthKey;

/// Size of the time bucket used to group records in a trend series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per calendar day
    Day,
    /// One bucket per calendar month
    #[default]
    Month,
    /// One bucket per calendar year
    Year,
}

impl Granularity {
    /// Map a date to its bucket
    pub fn bucket(&self, date: NaiveDate) -> BucketKey {
        match self {
            Self::Day => BucketKey::Day(date),
            Self::Month => BucketKey::Month(MonthKey::of(date)),
            Self::Year => BucketKey::Year(date.year()),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Month => write!(f, "month"),
            Self::Year => write!(f, "year"),
        }
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" => Ok(Self::Day),
            "month" | "monthly" => Ok(Self::Month),
            "year" | "yearly" => Ok(Self::Year),
            other => Err(format!(
                "Invalid granularity: {}. Use day, month or year",
                other
            )),
        }
    }
}

/// The chronological identity of a bucket
///
/// Derived ordering compares the underlying date values, so sorting keys of
/// one granularity is always chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "granularity", content = "value", rename_all = "lowercase")]
pub enum BucketKey {
    Day(NaiveDate),
    Month(MonthKey),
    Year(i32),
}

impl BucketKey {
    /// First calendar day covered by the bucket
    pub fn start_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Day(date) => Some(*date),
            Self::Month(key) => NaiveDate::from_ymd_opt(key.year, key.month, 1),
            Self::Year(year) => NaiveDate::from_ymd_opt(*year, 1, 1),
        }
    }
}

impl fmt::Display for BucketKey {
    /// Locale-independent labels: "2025-01-15", "2025-01", "2025"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Month(key) => write!(f, "{}", key),
            Self::Year(year) => write!(f, "{:04}", year),
        }
    }
}
