use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use scalar_analysis::calibration::read_csv;
use scalar_analysis::config::Config;
use scalar_analysis::pipeline::assimilate;

/// Combine a modelled and an observed room temperature into an analysis
#[derive(Parser, Debug)]
#[command(name = "scalar-analysis", version)]
struct Args {
    /// TOML configuration; the built-in reference dataset is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV of intercalibration readings (`instrument,value`), replacing the configured ones
    #[arg(long)]
    intercalibration: Option<PathBuf>,

    /// CSV of room readings (`instrument,value`), replacing the configured ones
    #[arg(long)]
    room: Option<PathBuf>,

    /// Log intermediate quantities
    #[arg(short, long)]
    verbose: bool,
}

fn load(args: &Args) -> scalar_analysis::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::reference(),
    };
    if let Some(path) = &args.intercalibration {
        config.intercalibration = read_csv(path)?;
    }
    if let Some(path) = &args.room {
        config.room = read_csv(path)?;
    }
    Ok(config)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match load(&args).and_then(|config| assimilate(&config)) {
        Ok(assimilation) => {
            println!("{}", assimilation.report());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
