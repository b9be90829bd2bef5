//! Stats Loader
//!
//! Run-to-completion loader: reads configuration, fetches a season's weekly
//! player stats, runs the stats pipeline and upserts the resulting records.

pub mod config;
pub mod logging;
pub mod report;

pub use config::{LoaderConfig, LoggingConfig};
pub use logging::{initialize_logging, initialize_logging_with_config};
