use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

mod cleaner;
mod config;
mod converter;
mod error;
mod progress;
mod reader;
mod render;
mod reveal;
mod schema;
mod stats;
mod table;
mod tree;
mod verify;

use config::{ConvertOptions, DEFAULT_TITLE_COLUMN, DEFAULT_URL_COLUMN};
use converter::Converter;
use schema::DEFAULT_FOLDER_PREFIX;

#[derive(Parser)]
#[command(name = "netscape-gen")]
#[command(about = "Convert spreadsheet bookmark lists into Netscape HTML bookmark files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that reads a spreadsheet
#[derive(Args)]
struct InputArgs {
    /// Input spreadsheet (.csv, .xlsx, .xlsm, .xls, .xlsb, .ods)
    input: PathBuf,

    /// Row holding the column headers (1 = first row, 2 = first row is blank/notes)
    #[arg(long, default_value_t = 1)]
    header_row: usize,

    /// Worksheet to read (defaults to the first sheet)
    #[arg(long)]
    sheet: Option<String>,

    /// Column holding bookmark titles
    #[arg(long, default_value = DEFAULT_TITLE_COLUMN)]
    title_column: String,

    /// Column holding bookmark URLs
    #[arg(long, default_value = DEFAULT_URL_COLUMN)]
    url_column: String,

    /// Prefix of folder level columns (FolderL1, FolderL2, ...)
    #[arg(long, default_value = DEFAULT_FOLDER_PREFIX)]
    folder_prefix: String,
}

impl InputArgs {
    fn to_options(&self, reveal: bool, show_progress: bool) -> ConvertOptions {
        ConvertOptions {
            title_column: self.title_column.clone(),
            url_column: self.url_column.clone(),
            folder_prefix: self.folder_prefix.clone(),
            header_row: self.header_row,
            sheet: self.sheet.clone(),
            reveal,
            show_progress,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a spreadsheet into a bookmark HTML file
    Convert {
        #[command(flatten)]
        input: InputArgs,

        /// Output HTML file (default: <input>_<timestamp>.html next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Reveal the written file in the system file manager
        #[arg(long)]
        reveal: bool,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,

        /// Dry run - convert without writing the output file
        #[arg(short, long)]
        dry_run: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show detected folder columns and statistics without writing anything
    Inspect {
        #[command(flatten)]
        input: InputArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { input, output, reveal, no_progress, dry_run, verbose } => {
            init_logging(verbose);
            info!("🔄 Converting {:?}", input.input);

            let converter = Converter::new(input.to_options(reveal, !no_progress))?;
            let report = converter.run(&input.input, output.as_deref(), dry_run)?;

            println!("{}", report.stats.summary());
            if report.written {
                println!("Output file saved to: {}", report.output.display());
                if !report.verified {
                    warn!("⚠️  Written file did not match the expected bookmark counts");
                }
                info!("✅ Conversion complete!");
            } else {
                println!("Dry run: {} was not written", report.output.display());
            }
        }

        Commands::Inspect { input, json, verbose } => {
            init_logging(verbose);
            info!("🔍 Inspecting {:?}", input.input);

            let converter = Converter::new(input.to_options(false, false))?;
            let inspection = converter.inspect(&input.input)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&inspection)?);
            } else {
                println!("Columns: {}", inspection.headers.join(", "));
                if inspection.folder_columns.is_empty() {
                    println!("Folder columns: (none)");
                } else {
                    println!("Folder columns:");
                    for column in inspection.folder_columns.columns() {
                        println!("  • L{}: {}", column.depth, column.name);
                    }
                }
                println!(
                    "Rows: {} read, {} kept",
                    inspection.rows_read, inspection.rows_kept
                );
                println!("{}", inspection.stats.summary());
            }
        }
    }

    Ok(())
}
