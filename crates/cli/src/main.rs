//! # recordbook-cli
//!
//! Command-line front end for recordbook.

mod config;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use comfy_table::Table;
use recordbook_core::{RecordForm, StoredRecord};
use recordbook_ingest::{IngestOptions, IngestReport, Outcome, RecordService};
use recordbook_sheet::is_supported_file;
use recordbook_store::{FirestoreStore, RecordStore};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// recordbook - manage personal records in a Firestore collection
#[derive(Parser)]
#[command(name = "recordbook")]
#[command(author, version, about = "Add, import and list personal records", long_about = None)]
struct Cli {
    /// YAML config file (defaults to <config dir>/recordbook/config.yaml)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate and store a single record
    Add(AddArgs),

    /// Import records from an .xlsx or .xls file
    Import {
        /// Spreadsheet to import (first sheet, first row holds the headers)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Maximum number of records submitted at once
        #[arg(long, default_value_t = 8)]
        concurrency: usize,
    },

    /// List every stored record
    List {
        /// Output format (table, json)
        #[arg(short = 'f', long = "format", default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    /// female, male or other
    #[arg(long)]
    gender: String,
    #[arg(long)]
    address: String,
    /// Digits only
    #[arg(long)]
    mobile: String,
}

impl From<AddArgs> for RecordForm {
    fn from(args: AddArgs) -> Self {
        RecordForm {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            gender: args.gender,
            address: args.address,
            mobile: args.mobile,
        }
    }
}

/// Output format for listings.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// JSON output
    Json,
    /// Aligned table output (default)
    #[default]
    Table,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let store_config = config::load_config(cli.config.as_deref())?;
    let store = FirestoreStore::new(&store_config).context("Failed to set up the record store")?;

    match cli.command {
        Command::Add(args) => run_add(&RecordService::new(store), args.into()).await,
        Command::Import { file, concurrency } => {
            let service = RecordService::new(store)
                .with_options(IngestOptions::default().with_concurrency(concurrency));
            run_import(&service, file).await
        }
        Command::List { format } => run_list(&RecordService::new(store), format).await,
    }
}

/// Validate and store one record.
async fn run_add<S: RecordStore>(service: &RecordService<S>, form: RecordForm) -> Result<()> {
    match service.submit(&form).await? {
        Outcome::Done(stored) => {
            println!("{} record {}", "Saved".green().bold(), stored.id);
            print!("{}", render_table(std::slice::from_ref(&stored)));
            Ok(())
        }
        Outcome::Busy => bail!("Another submission is still in progress"),
    }
}

/// Import a spreadsheet and summarize the per-row results.
async fn run_import<S: RecordStore>(service: &RecordService<S>, file: PathBuf) -> Result<()> {
    if !is_supported_file(&file) {
        bail!(
            "Unsupported file: {} (expected .xlsx or .xls)",
            file.display()
        );
    }
    let bytes = std::fs::read(&file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;

    let report = match service
        .import(&bytes)
        .await
        .with_context(|| format!("Failed to import {}", file.display()))?
    {
        Outcome::Done(report) => report,
        Outcome::Busy => bail!("Another import is still in progress"),
    };

    print!("{}", render_summary(&report));
    Ok(())
}

/// Fetch and print every stored record.
async fn run_list<S: RecordStore>(service: &RecordService<S>, format: OutputFormat) -> Result<()> {
    let records = service
        .list()
        .await
        .context("Failed to list records")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Table => {
            if records.is_empty() {
                println!("(no records)");
            } else {
                print!("{}", render_table(&records));
            }
        }
    }
    Ok(())
}

fn render_summary(report: &IngestReport) -> String {
    let mut out = format!(
        "{} {} of {} rows\n",
        "Imported".green().bold(),
        report.succeeded(),
        report.total()
    );
    for (row, err) in report.failures() {
        out.push_str(&format!("  {} row {row}: {err}\n", "failed".red()));
    }
    out
}

/// Render records as a bordered text table with a header row.
fn render_table(records: &[StoredRecord]) -> String {
    let mut table = Table::new();
    table.load_preset("||--+-++|    ++++++");
    table.set_header(vec!["ID", "Name", "Email", "Gender", "Mobile", "Address"]);
    for stored in records {
        let record = &stored.record;
        table.add_row(vec![
            stored.id.clone(),
            stored.name(),
            record.email.clone(),
            record.gender.clone(),
            record.mobile.clone(),
            record.address.clone(),
        ]);
    }
    format!("{table}\n")
}
