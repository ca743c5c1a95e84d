mod cli;

use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use suscoin::batch::{self, BatchReport, TripScore};
use suscoin::config;
use suscoin::report::{self, ModeListing, OutputFormat, TableReport};
use suscoin::types::config::SuscoinConfig;
use suscoin::{load_table, Scorer, SuscoinError};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const NOT_VIABLE: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn output_format(format: &cli::ReportFormat) -> OutputFormat {
    match format {
        cli::ReportFormat::Json => OutputFormat::Json,
        cli::ReportFormat::Md => OutputFormat::Md,
    }
}

fn load_settings(root: &Path) -> Result<SuscoinConfig, SuscoinError> {
    let loaded = config::load_config(root)?;
    if loaded.is_none() {
        debug!(root = %root.display(), "no suscoin config found; using built-in defaults");
    }
    Ok(loaded.unwrap_or_default())
}

/// An explicit table path is taken as given; the configured one is relative
/// to the config root.
fn resolve_table_path(root: &Path, cfg: &SuscoinConfig, explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        let configured = PathBuf::from(cfg.table_path());
        if configured.is_absolute() {
            configured
        } else {
            root.join(configured)
        }
    })
}

fn build_scorer(
    root: &Path,
    cfg: &SuscoinConfig,
    table: Option<PathBuf>,
) -> Result<Scorer, SuscoinError> {
    let settings = cfg.scorer_settings()?;
    let path = resolve_table_path(root, cfg, table);
    let table = load_table(&path, &settings.table_schema())?;
    Ok(Scorer::new(Arc::new(table), settings))
}

fn run() -> Result<i32, SuscoinError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    let cfg = load_settings(&cli.root)?;

    match cli.command {
        cli::Commands::Score(cmd) => {
            let scorer = build_scorer(&cli.root, &cfg, cmd.table)?;
            let trip = TripScore {
                assessment: scorer.assess(&cmd.mode, cmd.distance_km),
                mode: cmd.mode,
                input_km: cmd.distance_km,
            };
            println!(
                "{}",
                report::render_trip(&trip, output_format(&cmd.format))?
            );

            if trip.assessment.is_viable() {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::NOT_VIABLE)
            }
        }
        cli::Commands::Modes(cmd) => {
            let settings = cfg.scorer_settings()?;
            let listing = ModeListing::new(&settings.factors, &settings.rules);
            println!(
                "{}",
                report::render_modes(&listing, output_format(&cmd.format))?
            );
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Table(cmd) => {
            let settings = cfg.scorer_settings()?;
            let path = resolve_table_path(&cli.root, &cfg, cmd.path);
            let table = load_table(&path, &settings.table_schema())?;
            let table_report = TableReport {
                source: path.display().to_string(),
                summary: table.summary(settings.economy.max_band_km),
            };
            println!(
                "{}",
                report::render_table(&table_report, output_format(&cmd.format))?
            );
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Batch(cmd) => {
            let scorer = build_scorer(&cli.root, &cfg, cmd.table)?;
            let trips = batch::read_trips(&cmd.trips)?;
            let batch_report = BatchReport::score(&scorer, &trips);

            match cmd.out {
                Some(out) => {
                    let path = batch::write_report(&out, &batch_report)?;
                    println!(
                        "{}",
                        report::render_batch(&batch_report, OutputFormat::Md)?
                    );
                    println!("report file: {}", path.display());
                }
                None => {
                    println!(
                        "{}",
                        report::render_batch(&batch_report, OutputFormat::Json)?
                    );
                }
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
