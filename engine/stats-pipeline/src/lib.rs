//! Stats Pipeline
//!
//! Turns raw weekly player rows into the denormalized player stats records
//! that get upserted into the stats table. The stages run in order:
//!
//! 1. [`normalizer`] - alias resolution and fail-closed coercion into [`Observation`]s
//! 2. [`aggregator`] - season totals and per-game rates per (id, name, position, team)
//! 3. [`trailing`] - mean of the most recent weeks per player
//! 4. [`selector`] - top-K per role (QB/RB/WR/TE)
//! 5. [`records`] - left join into [`OutputRecord`]s
//!
//! [`StatsPipeline`] wires the stages together and hands the result to a
//! [`persistence::UpsertBackend`].

pub mod aggregator;
pub mod coerce;
pub mod config;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod raw;
pub mod records;
pub mod selector;
pub mod trailing;


pub use config::{GroupingKey, PipelineConfig, SelectionConfig};
pub use error::{FetchError, PipelineError, Result};
pub use models::*;
pub use pipeline::{PipelineOutput, RunSummary, StatsPipeline, PLAYER_CONFLICT_KEY};
pub use raw::{ObservationSource, RawRecord, StaticSource};
