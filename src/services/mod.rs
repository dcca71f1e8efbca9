//! Service layer for expense-tracker
//!
//! Business logic on top of the storage layer: validation, owner scoping
//! and canonical document writes.

pub mod record;

pub use record::{NewRecord, RecordPatch, RecordService};
