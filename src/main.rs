use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use yard_area::cli;

#[derive(Parser)]
#[command(name = "yard")]
#[command(about = "Storage-yard area calculator for aggregates: S = V / (q·Kис)")]
#[command(long_about = "Yard - storage-yard area calculator

Computes the yard area for Aggregate A, Aggregate B and Sand with
S = V / (q·Kис), sums them, and exports the report to Excel.

COMMANDS:
  calculate   - Compute areas from an input file
  export      - Compute and save the report to .xlsx
  show        - Read an exported report back
  presets     - List materials, storage types and coefficient ranges
  init        - Write a template input file

EXAMPLES:
  yard init inputs.yaml
  yard calculate inputs.yaml
  yard calculate inputs.yaml --json
  yard export inputs.yaml                      # Report_YYYY-MM-DD_HH-MM-SS.xlsx
  yard export inputs.yaml yard.xlsx

Logging: set RUST_LOG (e.g. RUST_LOG=yard_area=debug) or pass --verbose.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Compute storage areas from a YAML input file.

INPUT FILE:
  materials:
    - material: Aggregate A
      volume: 100
      storage_type: Open stacked yard   # optional, sets q to the range minimum
      q: 3.0                            # optional, clamped into the active range
      kis: 0.7                          # optional, clamped into [0.7, 0.8]

Every material needs a positive volume; the first one without it is
reported and nothing is calculated.")]
    /// Calculate storage areas from an input file
    Calculate {
        /// Path to YAML input file
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Also export the report to this .xlsx file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show verbose calculation steps
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Compute storage areas and export the report to Excel.

The worksheet has a bold header row, one row per material and a bold
TOTAL row. Without an output path the report is written to the current
directory as Report_YYYY-MM-DD_HH-MM-SS.xlsx.")]
    /// Export the calculated report to Excel .xlsx
    Export {
        /// Path to YAML input file
        file: PathBuf,

        /// Output Excel file path (.xlsx)
        output: Option<PathBuf>,

        /// Show verbose export steps
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show a previously exported .xlsx report
    Show {
        /// Path to Excel report
        file: PathBuf,
    },

    /// List materials, storage presets and coefficient ranges
    Presets,

    /// Write a template input file
    Init {
        /// Path of the YAML file to create
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "yard_area=debug"
    } else {
        "yard_area=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(
        cli.command,
        Commands::Calculate { verbose: true, .. } | Commands::Export { verbose: true, .. }
    );
    init_tracing(verbose);

    match cli.command {
        Commands::Calculate {
            file,
            json,
            output,
            verbose,
        } => cli::calculate(file.clone(), json, output, verbose)
            .with_context(|| format!("calculation from {} failed", file.display())),

        Commands::Export {
            file,
            output,
            verbose,
        } => cli::export(file.clone(), output, verbose)
            .with_context(|| format!("export from {} failed", file.display())),

        Commands::Show { file } => Ok(cli::show(file)?),

        Commands::Presets => Ok(cli::presets()?),

        Commands::Init { file } => Ok(cli::init(file)?),
    }
}
