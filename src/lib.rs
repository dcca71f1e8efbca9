//! expense-tracker - personal income and expense tracking
//!
//! Records income and expense entries per owner and derives the aggregates a
//! dashboard needs: income/expense/balance totals, category breakdowns and
//! income/expense series bucketed by day, month or year.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and settings (including the field fallback chains)
//! - `error`: Custom error types
//! - `models`: Records, amounts, date normalization, filters and buckets
//! - `storage`: JSON document store and document-to-record mapping
//! - `services`: Validated create/edit/delete of records
//! - `reports`: The aggregation engine and its reports
//! - `display`: Terminal formatting
//! - `export`: Report output and record exports
//! - `cli`: Command handlers used by the `expense` binary
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use expense_tracker::models::{EntryType, Granularity, Money, RecordFilter, TransactionRecord};
//! use expense_tracker::reports::{compute_summary, compute_time_series};
//!
//! let records = vec![
//!     TransactionRecord::new("a", "uid-1", "Salary", Money::from_cents(10000),
//!         EntryType::Income, "Salary", NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()),
//!     TransactionRecord::new("b", "uid-1", "Groceries", Money::from_cents(4000),
//!         EntryType::Expense, "Food & Dining", NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()),
//! ];
//!
//! let summary = compute_summary(&records, &RecordFilter::new());
//! assert_eq!(summary.balance, Money::from_cents(6000));
//!
//! let series = compute_time_series(&records, Granularity::Month);
//! assert_eq!(series.points.len(), 1);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
