mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::commission::PolicyArgs;

/// Monthly sales commission calculations
#[derive(Parser)]
#[command(
    name = "commission",
    version,
    about = "Monthly sales commission calculations",
    long_about = "A CLI for computing sales commissions from users and closed deals \
                  with decimal precision. Supports a flat-rate policy, bracketed \
                  commission on monthly totals, and tiered per-deal commission with \
                  month-scoped progress toward each user's objective."
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
    /// Flat rate by deal count with a volume bonus
    FlatRate(PolicyArgs),
    /// Bracketed rates on each user's total sales
    Bracketed(PolicyArgs),
    /// Tiered per-deal commission with monthly progress
    Tiered(PolicyArgs),
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

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("COMMISSION_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result: Result<Option<serde_json::Value>, Box<dyn std::error::Error>> = match cli.command {
        Commands::FlatRate(args) => commands::commission::run_flat_rate(args),
        Commands::Bracketed(args) => commands::commission::run_bracketed(args),
        Commands::Tiered(args) => commands::commission::run_tiered(args),
        Commands::Version => {
            println!("commission {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(Some(value)) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Ok(None) => process::exit(0),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
