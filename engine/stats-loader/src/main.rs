//! Weekly player stats loader
//!
//! Exits non-zero on any fatal configuration, fetch, transform or upload error.

use anyhow::{Context, Result};
use clap::Parser;
use persistence::{JsonFileBackend, RestBackend, UpsertBackend};
use stats_loader::{initialize_logging, report, LoaderConfig};
use stats_pipeline::{PipelineError, StatsPipeline};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use weekly_stats_fetcher::WeeklyStatsFetcher;

/// Load a season's weekly player stats into the player stats table
#[derive(Parser, Debug)]
#[command(name = "stats-loader")]
#[command(about = "Aggregate weekly NFL player stats and upsert them")]
struct Args {
    /// Target season (overrides STATS_SEASON)
    #[arg(long)]
    season: Option<i32>,

    /// Target table (overrides PLAYER_STATS_TABLE)
    #[arg(long)]
    table: Option<String>,

    /// Rows per upsert request
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Fetch and transform only; nothing is written
    #[arg(long)]
    dry_run: bool,

    /// Write tables as JSON files under this directory instead of the REST endpoint
    #[arg(long)]
    local_dir: Option<PathBuf>,

    /// Players shown per role in the console report
    #[arg(long, default_value_t = 5)]
    top: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    if let Err(e) = initialize_logging() {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Stats load failed: {:#}", e);
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    info!("Starting stats loader v{}", env!("CARGO_PKG_VERSION"));

    let mut config = LoaderConfig::from_env()?;
    config.apply_overrides(args.season, args.table, args.chunk_size, args.dry_run, args.local_dir);
    config.validate()?;

    let table = config.table_name();
    info!("Season {} -> table {} (dry run: {})", config.pipeline.season, table, config.dry_run);

    let pipeline = StatsPipeline::new(config.pipeline.clone())?;
    let fetcher = WeeklyStatsFetcher::new(config.fetcher.clone()).context("Failed to create weekly stats fetcher")?;

    if config.dry_run {
        let raw = pipeline.fetch(&fetcher).await?;
        let output = pipeline.transform(&raw)?;
        print!("{}", report::render_selection(&output, args.top));
        println!("\nDry run: {} records built, nothing written", output.records.len());
        return Ok(());
    }

    let backend = build_backend(&config)?;
    let (output, summary) = pipeline.run(&fetcher, backend.as_ref(), &table, config.persistence.chunk_size).await?;

    print!("{}", report::render_selection(&output, args.top));
    println!("{}", report::render_summary(&summary));

    info!("Stats load completed");
    Ok(())
}

fn build_backend(config: &LoaderConfig) -> Result<Box<dyn UpsertBackend>, PipelineError> {
    match &config.local_dir {
        Some(dir) => {
            info!("Writing tables to {:?}", dir);
            Ok(Box::new(JsonFileBackend::new(dir.clone())))
        }
        None => Ok(Box::new(RestBackend::new(&config.persistence)?)),
    }
}
