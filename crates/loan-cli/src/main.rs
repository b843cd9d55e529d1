mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::chart::ChartArgs;
use commands::projection::{AmortizationArgs, SensitivityArgs};
use commands::solve::SolveArgs;

/// Fixed-rate loan calculations with decimal precision
#[derive(Parser)]
#[command(
    name = "loan",
    version,
    about = "Fixed-rate loan calculations with decimal precision",
    long_about = "Solve any one of principal, annual rate, term, or payment of a \
                  fixed-rate amortizing loan from the other three, and project \
                  amortization and rate-sensitivity curves for plotting."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve for the unknown loan quantity
    Solve(SolveArgs),
    /// Project the month-by-month balance decay
    Amortization(AmortizationArgs),
    /// Sweep annual rates and record the implied payment
    Sensitivity(SensitivityArgs),
    /// Map a projection onto a device canvas as line segments
    Chart(ChartArgs),
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

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Solve(args) => commands::solve::run_solve(args),
        Commands::Amortization(args) => commands::projection::run_amortization(args),
        Commands::Sensitivity(args) => commands::projection::run_sensitivity(args),
        Commands::Chart(args) => commands::chart::run_chart(args),
        Commands::Version => {
            println!("loan {}", env!("CARGO_PKG_VERSION"));
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
