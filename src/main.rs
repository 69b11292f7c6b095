use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use radex_scenarios::{run_scenarios, write_artifacts, RunConfig};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Simulate radiative cooling of two black-body cylinders and chart the temperatures"
)]
struct Args {
    /// TOML file overriding parameters, time grid, scenarios or chart settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the charts and CSV are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Skip writing trajectories.csv
    #[arg(long)]
    no_csv: bool,
}

fn load_config(args: &Args) -> Result<RunConfig> {
    match &args.config {
        Some(path) => RunConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(RunConfig::default()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = load_config(&args)?;
    fs::create_dir_all(&args.output_dir).context("Failed to create output directory")?;

    let outcomes = run_scenarios(&config.parameters, &config.grid, &config.scenarios)
        .context("Failed to run scenarios")?;
    for outcome in &outcomes {
        info!(
            "{}: T(A) {:.2} K -> {:.2} K",
            outcome.name,
            outcome.result.a.initial(),
            outcome.result.a.last()
        );
    }

    write_artifacts(&outcomes, &config.chart, &args.output_dir, !args.no_csv)
        .context("Failed to write artifacts")?;

    Ok(())
}
