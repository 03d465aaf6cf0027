mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::lease::{ComputeArgs, JournalArgs};
use commands::time_value::PvArgs;

/// IFRS 16 lessee lease calculations
#[derive(Parser)]
#[command(
    name = "leasecalc",
    version,
    about = "IFRS 16 lessee lease calculations",
    long_about = "An educational calculator for IFRS 16 lessee accounting with decimal \
                  precision. Measures the lease liability and right-of-use asset, builds \
                  the liability amortisation schedule and prints illustrative journal \
                  entries. Defaults reproduce a 4-period, 25,000 per period, 5% lease."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure a lease: liability, ROU asset, depreciation and schedule
    Compute(ComputeArgs),
    /// Journal entries at commencement and end of period 1
    Journal(JournalArgs),
    /// Present value of a level payment stream
    Pv(PvArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Compute(args) => commands::lease::run_compute(args),
        Commands::Journal(args) => commands::lease::run_journal(args),
        Commands::Pv(args) => commands::time_value::run_pv(args),
        Commands::Version => {
            println!("leasecalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
