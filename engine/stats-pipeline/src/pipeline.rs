//! Pipeline orchestration: fetch, transform, persist

use crate::aggregator::aggregate_season_totals;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{AggregatedPlayer, Observation, OutputRecord, SelectionResult, TrailingAverage};
use crate::normalizer::Normalizer;
use crate::raw::{ObservationSource, RawRecord};
use crate::records::{build_records, to_rows};
use crate::selector::select_top_players;
use crate::trailing::compute_trailing_averages;
use chrono::{DateTime, Utc};
use persistence::{upsert_in_chunks, UpsertBackend, UpsertSummary};
use serde::Serialize;
use tracing::info;

/// Conflict column for player stats upserts
pub const PLAYER_CONFLICT_KEY: &str = "player_id";

/// Everything the transform stages produced for one run
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    pub raw_rows: usize,
    pub dropped_other_season: usize,
    pub dropped_missing_id: usize,
    pub observations: Vec<Observation>,
    pub aggregated: Vec<AggregatedPlayer>,
    pub trailing: Vec<TrailingAverage>,
    pub selection: Vec<SelectionResult>,
    pub records: Vec<OutputRecord>,
}

/// Result of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub season: i32,
    pub table: String,
    pub raw_rows: usize,
    pub observations: usize,
    pub aggregated_players: usize,
    pub selected_players: usize,
    pub rows_written: usize,
    pub chunks_written: usize,
    pub completed_at: DateTime<Utc>,
}

/// Weekly stats pipeline for one target season
pub struct StatsPipeline {
    config: PipelineConfig,
    normalizer: Normalizer,
}

impl StatsPipeline {
    /// Create a new pipeline. Rejects invalid configuration.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let normalizer = Normalizer::new(config.season);
        Ok(Self { config, normalizer })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fetch the target season's raw rows
    pub async fn fetch(&self, source: &dyn ObservationSource) -> Result<Vec<RawRecord>> {
        info!("Fetching {} weekly rows from {}", self.config.season, source.describe());
        let rows = source.fetch_season(self.config.season).await?;
        info!("Fetched {} raw rows", rows.len());
        Ok(rows)
    }

    /// Run the normalize, aggregate, trailing, select and build stages
    pub fn transform(&self, raw: &[RawRecord]) -> Result<PipelineOutput> {
        let batch = self.normalizer.normalize_all(raw);
        let observations = batch.observations;

        let aggregated = aggregate_season_totals(&observations);
        let trailing = compute_trailing_averages(
            &observations,
            self.config.trailing_window,
            self.config.trailing_grouping,
        );
        let selection = select_top_players(&aggregated, &self.config.selection);
        let records = build_records(&selection, &trailing);

        info!(
            "Processing {} players ({} observations, {} aggregated rows, {} dropped from other seasons, {} without player id)",
            records.len(),
            observations.len(),
            aggregated.len(),
            batch.dropped_other_season,
            batch.dropped_missing_id
        );

        Ok(PipelineOutput {
            raw_rows: raw.len(),
            dropped_other_season: batch.dropped_other_season,
            dropped_missing_id: batch.dropped_missing_id,
            observations,
            aggregated,
            trailing,
            selection,
            records,
        })
    }

    /// Upsert built records keyed by player id
    pub async fn persist(
        &self,
        records: &[OutputRecord],
        backend: &dyn UpsertBackend,
        table: &str,
        chunk_size: usize,
    ) -> Result<UpsertSummary> {
        let rows = to_rows(records)?;
        let summary = upsert_in_chunks(backend, table, &rows, PLAYER_CONFLICT_KEY, chunk_size).await?;
        Ok(summary)
    }

    /// Fetch, transform and persist in sequence. Any stage failure aborts the run.
    pub async fn run(
        &self,
        source: &dyn ObservationSource,
        backend: &dyn UpsertBackend,
        table: &str,
        chunk_size: usize,
    ) -> Result<(PipelineOutput, RunSummary)> {
        let raw = self.fetch(source).await?;
        let output = self.transform(&raw)?;
        let upsert = self.persist(&output.records, backend, table, chunk_size).await?;

        let summary = self.summarize(&output, table, &upsert);
        info!("Uploaded {} rows to {}", summary.rows_written, summary.table);

        Ok((output, summary))
    }

    /// Build a run summary from transform output and an upsert outcome
    pub fn summarize(&self, output: &PipelineOutput, table: &str, upsert: &UpsertSummary) -> RunSummary {
        RunSummary {
            season: self.config.season,
            table: table.to_string(),
            raw_rows: output.raw_rows,
            observations: output.observations.len(),
            aggregated_players: output.aggregated.len(),
            selected_players: output.selection.len(),
            rows_written: upsert.rows_written,
            chunks_written: upsert.chunks_written,
            completed_at: Utc::now(),
        }
    }
}
