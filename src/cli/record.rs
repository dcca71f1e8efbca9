//! CLI commands for transaction records
//!
//! Listing, adding, editing, deleting and exporting one owner's records.

use std::io::BufWriter;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};

use crate::display::{format_category_list, format_record_details};
use crate::error::{TrackerError, TrackerResult};
use crate::export::{export_owner_json, export_owner_yaml, export_records_csv, OwnerExport};
use crate::models::date::parse_date_text;
use crate::models::{EntryType, Money, RecordId};
use crate::reports::{distinct_categories, RegisterReport};
use crate::services::{NewRecord, RecordPatch};

use super::{create_file, emit, FilterArgs, OutputArgs, Session};

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON (records, summary and metadata)
    Json,
    /// YAML (same content, human-readable)
    Yaml,
    /// CSV (records only)
    Csv,
}

/// Record subcommands
#[derive(Subcommand, Debug)]
pub enum RecordCommands {
    /// List transactions in date order
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Only this category (case-insensitive; "Other" matches blanks)
        #[arg(short, long)]
        category: Option<String>,

        /// Show only the last N
        #[arg(short, long)]
        limit: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the most recent transactions
    Recent {
        /// Number of transactions (default from config)
        #[arg(short, long)]
        limit: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show one transaction
    Show {
        /// Transaction ID
        id: String,
    },

    /// Record a transaction
    Add {
        /// What it was for
        title: String,

        /// Amount (e.g. "250" or "49.99")
        amount: String,

        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        entry_type: EntryType,

        /// Category (defaults to the first suggestion)
        #[arg(short, long)]
        category: Option<String>,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New amount
        #[arg(short, long)]
        amount: Option<String>,

        /// New type
        #[arg(short = 't', long = "type")]
        entry_type: Option<EntryType>,

        /// New category
        #[arg(short, long)]
        category: Option<String>,

        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete a transaction
    #[command(alias = "rm")]
    Delete {
        /// Transaction ID
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Show suggested categories and the ones in use
    Categories,

    /// Export all of the owner's transactions to a file
    Export {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Handle record commands
pub fn handle_record_command(session: &Session<'_>, cmd: RecordCommands) -> TrackerResult<()> {
    match cmd {
        RecordCommands::List {
            filter,
            category,
            limit,
            output,
        } => {
            let loaded = session.load()?;
            let mut report = RegisterReport::generate(
                &loaded.records,
                &filter.to_filter(),
                category.as_deref(),
                limit,
            );
            report.quality = report.quality.with_malformed(loaded.malformed);
            emit(&report, &output, session.currency())
        }
        RecordCommands::Recent { limit, output } => {
            let loaded = session.load()?;
            let limit = limit.unwrap_or(session.settings.recent_limit);
            let mut report = RegisterReport::recent(&loaded.records, limit);
            report.quality = report.quality.with_malformed(loaded.malformed);
            emit(&report, &output, session.currency())
        }
        RecordCommands::Show { id } => {
            let record = session.records().get(&session.owner, &RecordId::new(id))?;
            print!("{}", format_record_details(&record, session.currency()));
            Ok(())
        }
        RecordCommands::Add {
            title,
            amount,
            entry_type,
            category,
            date,
        } => {
            let input = NewRecord {
                title,
                amount: parse_amount(&amount)?,
                entry_type,
                category,
                date: date.as_deref().map(parse_date).transpose()?,
            };
            let record = session.records().create(&session.owner, input)?;

            println!("Recorded transaction:");
            print!("{}", indent(&format_record_details(&record, session.currency())));
            Ok(())
        }
        RecordCommands::Edit {
            id,
            title,
            amount,
            entry_type,
            category,
            date,
        } => {
            let patch = RecordPatch {
                title,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                entry_type,
                category,
                date: date.as_deref().map(parse_date).transpose()?,
            };
            if patch.is_empty() {
                println!("Nothing to change. Pass at least one of --title, --amount, --type, --category or --date.");
                return Ok(());
            }

            let record = session
                .records()
                .update(&session.owner, &RecordId::new(id), patch)?;
            println!("Updated transaction:");
            print!("{}", indent(&format_record_details(&record, session.currency())));
            Ok(())
        }
        RecordCommands::Delete { id, force } => {
            let id = RecordId::new(id);
            let service = session.records();

            if !force {
                let record = service.get(&session.owner, &id)?;
                println!("About to delete transaction:");
                print!("{}", indent(&format_record_details(&record, session.currency())));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let removed = service.delete(&session.owner, &id)?;
            println!("Deleted transaction: {}", removed);
            Ok(())
        }
        RecordCommands::Categories => {
            let loaded = session.load()?;
            print!("{}", format_category_list(&distinct_categories(&loaded.records)));
            Ok(())
        }
        RecordCommands::Export {
            output,
            format,
            pretty,
        } => {
            let loaded = session.load()?;
            let mut writer = BufWriter::new(create_file(&output)?);

            match format {
                ExportFormat::Json => {
                    let export = OwnerExport::new(session.owner.clone(), &loaded);
                    export_owner_json(&export, &mut writer, pretty)?;
                }
                ExportFormat::Yaml => {
                    let export = OwnerExport::new(session.owner.clone(), &loaded);
                    export_owner_yaml(&export, &mut writer)?;
                }
                ExportFormat::Csv => export_records_csv(&loaded.records, &mut writer)?,
            }

            println!(
                "Exported {} transactions to: {}",
                loaded.records.len(),
                output.display()
            );
            Ok(())
        }
    }
}

fn parse_amount(s: &str) -> TrackerResult<Money> {
    Money::parse(s).map_err(|e| TrackerError::Validation(e.to_string()))
}

fn parse_date(s: &str) -> TrackerResult<NaiveDate> {
    parse_date_text(s).ok_or_else(|| {
        TrackerError::Validation(format!("Invalid date format: {}. Use YYYY-MM-DD", s))
    })
}

fn indent(text: &str) -> String {
    text.lines().map(|line| format!("  {}\n", line)).collect()
}
