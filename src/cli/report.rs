//! CLI commands for reports
//!
//! Summary cards, category breakdown, trend series and the month list.

use clap::Subcommand;
use tracing::debug;

use crate::error::TrackerResult;
use crate::models::{Granularity, MonthFilter, RecordFilter};
use crate::reports::{compute_summary, BreakdownKind, BreakdownReport, MonthsReport, TrendReport};

use super::{emit, FilterArgs, OutputArgs, Session};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Show income, expense and balance
    Summary {
        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show totals by category
    Breakdown {
        /// income, expense or overview (income vs expense)
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: BreakdownKind,

        /// Calendar month: all, YYYY-MM or "January 2025"
        #[arg(short, long, default_value = "all")]
        month: MonthFilter,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show income and expense per day, month or year
    Trend {
        /// Bucket size (default from config)
        #[arg(short, long)]
        granularity: Option<Granularity>,

        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List months that have transactions
    Months {
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Handle report commands
pub fn handle_report_command(session: &Session<'_>, cmd: ReportCommands) -> TrackerResult<()> {
    let loaded = session.load()?;
    debug!(records = loaded.records.len(), owner = %session.owner, "loaded records");

    match cmd {
        ReportCommands::Summary { filter, output } => {
            let mut summary = compute_summary(&loaded.records, &filter.to_filter());
            summary.quality = summary.quality.with_malformed(loaded.malformed);
            emit(&summary, &output, session.currency())
        }
        ReportCommands::Breakdown {
            kind,
            month,
            output,
        } => {
            let filter = RecordFilter {
                month,
                ..RecordFilter::default()
            };
            let mut report = BreakdownReport::generate(&loaded.records, &filter, kind);
            report.quality = report.quality.with_malformed(loaded.malformed);
            emit(&report, &output, session.currency())
        }
        ReportCommands::Trend {
            granularity,
            filter,
            output,
        } => {
            let granularity = granularity.unwrap_or(session.settings.default_granularity);
            let mut report = TrendReport::generate(&loaded.records, &filter.to_filter(), granularity);
            report.quality = report.quality.with_malformed(loaded.malformed);
            emit(&report, &output, session.currency())
        }
        ReportCommands::Months { output } => {
            let mut report = MonthsReport::generate(&loaded.records);
            report.quality = report.quality.with_malformed(loaded.malformed);
            emit(&report, &output, session.currency())
        }
    }
}
