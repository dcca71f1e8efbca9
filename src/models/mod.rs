//! Core data models for expense-tracker
//!
//! Records, amounts, dates and the filter/bucket vocabulary shared by the
//! storage layer and the aggregation engine.

pub mod category;
pub mod date;
pub mod filter;
pub mod granularity;
pub mod ids;
pub mod money;
pub mod month;
pub mod record;

pub use category::{category_label, SENTINEL_CATEGORY, SUGGESTED_CATEGORIES};
pub use date::{resolve_date, RawDate};
pub use filter::{MonthFilter, MonthMatch, RecordFilter, TypeFilter};
pub use granularity::{BucketKey, Granularity};
pub use ids::{OwnerId, RecordId};
pub use money::Money;
pub use month::MonthKey;
pub use record::{EntryType, RecordKind, TransactionRecord};
