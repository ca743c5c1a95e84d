use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "suscoin",
    version,
    about = "susCoin transport scoring engine: scores, coins and CO2e savings per trip"
)]
pub struct Cli {
    /// Directory searched for suscoin.toml and .suscoin/local.toml
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all logging except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a single trip
    Score(ScoreCommand),
    /// List transport modes, emission factors and distance rules
    Modes(ModesCommand),
    /// Load a score table and summarize it
    Table(TableCommand),
    /// Score every trip in a mode,distance_km CSV
    Batch(BatchCommand),
}

#[derive(Args)]
pub struct ScoreCommand {
    pub mode: String,
    #[arg(allow_negative_numbers = true)]
    pub distance_km: f64,
    /// Score table to use instead of the configured one
    #[arg(long)]
    pub table: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ModesCommand {
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct TableCommand {
    /// Score table to inspect; defaults to the configured one
    pub path: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct BatchCommand {
    pub trips: PathBuf,
    #[arg(long)]
    pub table: Option<PathBuf>,
    /// Write the JSON report here instead of printing it
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
