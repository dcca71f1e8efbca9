use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use expense_tracker::cli::{
    handle_record_command, handle_report_command, RecordCommands, ReportCommands, Session,
};
use expense_tracker::config::{paths::TrackerPaths, settings::Settings};
use expense_tracker::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Personal income and expense tracker",
    long_about = "Record income and expenses, then see totals, category \
                  breakdowns and trends per day, month or year. Reads the \
                  local document store, or any JSON export passed with --file."
)]
struct Cli {
    /// Read documents from this JSON file instead of the local store
    #[arg(long, global = true, env = "EXPENSE_TRACKER_FILE")]
    file: Option<PathBuf>,

    /// Whose records to use (defaults to default_owner in config.json)
    #[arg(short = 'u', long, global = true, env = "EXPENSE_TRACKER_OWNER")]
    owner: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Report(ReportCommands),

    #[command(flatten)]
    Record(RecordCommands),

    /// Create the data directory and default config
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = TrackerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("expense - personal income and expense tracker");
            println!();
            println!("Run 'expense --help' for usage information.");
            println!("Run 'expense init --owner <ID>' to get started.");
            return Ok(());
        }
    };

    match command {
        Commands::Init => {
            if let Some(owner) = cli.owner {
                settings.default_owner = Some(owner);
                settings.save(&paths)?;
            }
            let created = initialize_storage(&paths, &settings)?;
            if created {
                println!("Initialized expense tracker at: {}", paths.base_dir().display());
            } else {
                println!("Already initialized at: {}", paths.base_dir().display());
            }
            match &settings.default_owner {
                Some(owner) => println!("Default owner: {}", owner),
                None => println!("No default owner set. Pass --owner or run 'expense init --owner <ID>'."),
            }
        }
        Commands::Config => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Config file:     {}", paths.settings_file().display());
            println!("Documents file:  {}", paths.documents_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!(
                "  Default owner:       {}",
                settings.default_owner.as_deref().unwrap_or("(none)")
            );
            println!("  Default granularity: {}", settings.default_granularity);
            println!("  Recent limit:        {}", settings.recent_limit);
            println!("  Date fields:         {}", settings.date_fields.join(", "));
            println!("  Owner fields:        {}", settings.owner_fields.join(", "));
        }
        Commands::Report(cmd) => {
            let storage = open_storage(&paths, cli.file)?;
            let owner = settings.resolve_owner(cli.owner)?;
            handle_report_command(&Session::new(&storage, &settings, owner), cmd)?;
        }
        Commands::Record(cmd) => {
            let storage = open_storage(&paths, cli.file)?;
            let owner = settings.resolve_owner(cli.owner)?;
            handle_record_command(&Session::new(&storage, &settings, owner), cmd)?;
        }
    }

    Ok(())
}

fn open_storage(paths: &TrackerPaths, file: Option<PathBuf>) -> Result<Storage> {
    let storage = match file {
        Some(file) => Storage::with_documents_file(paths.clone(), file),
        None => Storage::new(paths.clone())?,
    };
    storage
        .load_all()
        .with_context(|| format!("Failed to load {}", storage.documents.path().display()))?;
    Ok(storage)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
