//! CLI command handlers
//!
//! Bridges clap argument parsing with the record service and the reports.
//! Every handler works on one owner's records, loaded once per invocation.

pub mod record;
pub mod report;

pub use record::{handle_record_command, RecordCommands};
pub use report::{handle_report_command, ReportCommands};

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::export::{write_report, OutputFormat, Report};
use crate::models::{MonthFilter, OwnerId, RecordFilter, TypeFilter};
use crate::services::RecordService;
use crate::storage::{LoadedRecords, Storage};

/// What every owner-scoped command needs
pub struct Session<'a> {
    pub storage: &'a Storage,
    pub settings: &'a Settings,
    pub owner: OwnerId,
}

impl<'a> Session<'a> {
    /// Create a session for one owner
    pub fn new(storage: &'a Storage, settings: &'a Settings, owner: OwnerId) -> Self {
        Self {
            storage,
            settings,
            owner,
        }
    }

    /// Record service using the configured field chains
    pub fn records(&self) -> RecordService<'a> {
        RecordService::new(self.storage, self.settings.field_mapping())
    }

    /// Load the owner's records
    pub fn load(&self) -> TrackerResult<LoadedRecords> {
        self.records().list(&self.owner)
    }

    /// Currency symbol for terminal output
    pub fn currency(&self) -> &str {
        &self.settings.currency_symbol
    }
}

/// Type and month filters shared by the reports
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Transaction type: all, income or expense
    #[arg(short = 't', long = "type", default_value = "all")]
    pub entry_type: TypeFilter,

    /// Calendar month: all, YYYY-MM or "January 2025"
    #[arg(short, long, default_value = "all")]
    pub month: MonthFilter,
}

impl FilterArgs {
    /// The record filter these arguments describe
    pub fn to_filter(&self) -> RecordFilter {
        RecordFilter {
            entry_type: self.entry_type,
            month: self.month,
        }
    }
}

/// Output format and destination
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Write a report to stdout or to the requested file
pub fn emit<R: Report>(report: &R, output: &OutputArgs, currency: &str) -> TrackerResult<()> {
    match &output.output {
        Some(path) => {
            let mut writer = BufWriter::new(create_file(path)?);
            write_report(report, output.format, currency, &mut writer)?;
            println!("Report exported to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_report(report, output.format, currency, &mut lock)?;
        }
    }
    Ok(())
}

/// Create an output file, mapping the failure to an export error
pub fn create_file(path: &Path) -> TrackerResult<File> {
    File::create(path).map_err(|e| {
        TrackerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })
}
