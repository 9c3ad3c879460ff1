//! # ccwrapped-core
//!
//! Core library for ccwrapped - a "year in review" digest of Claude Code usage.
//!
//! This library provides:
//! - Input types mirroring `~/.claude/stats-cache.json` and `~/.claude/history.jsonl`
//! - A record source that reads those files and restricts them to a period
//! - The metrics engine that turns the records into a [`MetricsResult`]
//! - Configuration management and logging infrastructure
//!
//! ## Architecture
//!
//! Data flows in one direction:
//! - **Source:** raw files on disk, read and filtered by [`RecordSource`]
//! - **Engine:** pure aggregation in [`metrics`], no I/O and no clock reads
//! - **Presentation:** renderers and JSON export consume the result read-only
//!
//! ## Example
//!
//! ```rust,no_run
//! use ccwrapped_core::{calculate_metrics, Config, Period, RecordSource};
//!
//! let config = Config::load().expect("failed to load config");
//! let range = Period::Year.resolve_now();
//!
//! let source = RecordSource::from_config(&config);
//! let (stats, history) = source.load(&range).expect("failed to read Claude Code data");
//!
//! let metrics = calculate_metrics(&stats, &history);
//! println!("{} messages", metrics.activity.total_messages);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use metrics::{calculate_metrics, MetricsResult};
pub use period::{Period, TimeRange};
pub use source::RecordSource;
pub use types::*;

// Public modules
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod metrics;
pub mod period;
pub mod source;
pub mod types;
