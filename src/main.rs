use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use timetable_ingest::logging;
use timetable_ingest::{DatasetStore, IngestError, Result};
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = logging::init_tracing(cli.verbose) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }

    let store = DatasetStore::new();
    if let Err(failure) = run(cli.command, &store) {
        error!(error = %failure, "upload failed");
        match failure {
            IngestError::MissingInput(path) => {
                eprintln!("error: no file uploaded ({})", path.display());
            }
            _ => eprintln!("error: internal error processing file"),
        }
        std::process::exit(1);
    }
}

fn run(command: Command, store: &DatasetStore) -> Result<()> {
    match command {
        Command::Upload(args) => execute_upload(args, store),
    }
}

fn execute_upload(args: UploadArgs, store: &DatasetStore) -> Result<()> {
    if !args.input.is_file() {
        return Err(IngestError::MissingInput(args.input));
    }

    let file_name = args
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    info!(file = %file_name, "processing file");

    let bytes = std::fs::read(&args.input)?;
    let summary = store.ingest(&bytes)?;
    print_json(&summary, args.pretty)?;

    if args.dump {
        print_json(&store.snapshot(), args.pretty)?;
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Validate a courses/slots/enrollments workbook and load it."
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a workbook, publish it as the current dataset and print a summary.
    Upload(UploadArgs),
}

#[derive(clap::Args)]
struct UploadArgs {
    /// Workbook to ingest (xlsx, xlsb, ods or xls).
    #[arg(long)]
    input: PathBuf,

    /// Also print the stored dataset after the upload.
    #[arg(long)]
    dump: bool,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,
}
