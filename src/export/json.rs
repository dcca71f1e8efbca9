//! JSON export of one owner's records
//!
//! The export carries the records exactly as the engine sees them (raw date
//! shapes included) together with the unfiltered summary, so a later reader
//! can check the totals.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::TrackerResult;
use crate::models::{OwnerId, RecordFilter, TransactionRecord};
use crate::reports::{compute_summary, Summary};
use crate::storage::LoadedRecords;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Export of everything one owner has recorded
#[derive(Debug, Clone, Serialize)]
pub struct OwnerExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Whose records these are
    pub owner: OwnerId,

    /// Unfiltered totals (amounts in minor units)
    pub summary: Summary,

    /// Records in date order
    pub records: Vec<TransactionRecord>,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub record_count: usize,
    pub malformed_documents: usize,
    pub unresolved_dates: usize,
    pub unrecognized_types: usize,
}

impl OwnerExport {
    /// Build an export from loaded records
    pub fn new(owner: OwnerId, loaded: &LoadedRecords) -> Self {
        let summary = compute_summary(&loaded.records, &RecordFilter::new());

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            owner,
            metadata: ExportMetadata {
                record_count: loaded.records.len(),
                malformed_documents: loaded.malformed,
                unresolved_dates: summary.quality.unresolved_dates,
                unrecognized_types: summary.quality.unrecognized_types,
            },
            summary,
            records: loaded.records.clone(),
        }
    }
}

/// Write an export as JSON
pub fn export_owner_json<W: Write>(
    export: &OwnerExport,
    writer: &mut W,
    pretty: bool,
) -> TrackerResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, export)?;
    } else {
        serde_json::to_writer(&mut *writer, export)?;
    }
    writeln!(writer)?;
    Ok(())
}
