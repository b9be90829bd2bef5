use anyhow::{Context, Result};
use clap::Parser;
use persistence::{upsert_in_chunks, PersistenceConfig};
use standings_scraper::{save_backend, PfrStandingsScraper, STANDINGS_CONFLICT_KEY, STANDINGS_TABLE};
use stats_pipeline::config::DEFAULT_SEASON;
use std::path::PathBuf;
use tracing::{info, warn};

/// Scrape NFL conference standings and optionally save them
#[derive(Parser)]
#[command(name = "scrape_standings")]
#[command(about = "Scrape NFL standings from Pro Football Reference")]
struct Args {
    /// Season to scrape
    #[arg(long, default_value_t = DEFAULT_SEASON)]
    season: i32,

    /// Upsert the scraped rows into the standings table
    #[arg(long)]
    save: bool,

    /// Table name override
    #[arg(long, default_value = STANDINGS_TABLE)]
    table: String,

    /// Save to JSON files under this directory instead of the REST endpoint
    #[arg(long)]
    local_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    info!("Starting NFL standings scraper for {}", args.season);

    let config = PersistenceConfig::from_env();
    let backend = if args.save {
        Some(save_backend(args.local_dir.clone(), &config).context("Missing or invalid REST credentials")?)
    } else {
        None
    };

    let scraper = PfrStandingsScraper::new()?;
    let standings = scraper.scrape_standings(args.season).await?;

    print!("{}", standings.render_table());

    println!("\nSummary:");
    println!("- Total AFC teams: {}", standings.conference("AFC").len());
    println!("- Total NFC teams: {}", standings.conference("NFC").len());
    println!("\n* = Division Leader");
    println!("+ = Wild Card");

    if standings.teams.is_empty() {
        anyhow::bail!("No standings scraped for {}", args.season);
    }

    let Some(backend) = backend else {
        info!("Scraping completed (not saved, pass --save to upsert)");
        return Ok(());
    };

    let rows = standings.to_rows().context("Failed to serialize standings")?;

    let summary = upsert_in_chunks(
        backend.as_ref(),
        &args.table,
        &rows,
        STANDINGS_CONFLICT_KEY,
        config.chunk_size,
    )
    .await
    .context("Failed to save standings")?;

    if summary.rows_written != standings.teams.len() {
        warn!("Expected {} rows written, got {}", standings.teams.len(), summary.rows_written);
    }

    println!("\nSaved {} teams to {}", summary.rows_written, summary.table);
    info!("Scraping completed successfully!");
    Ok(())
}
