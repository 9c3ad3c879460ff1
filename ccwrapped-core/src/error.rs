//! Error types for ccwrapped-core

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the ccwrapped-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parse error for one of the data sources
    #[error("parse error in {file}: {message}")]
    Parse { file: String, message: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// The stats cache has never been written
    #[error("stats file not found at {}. Have you used Claude Code yet?", .0.display())]
    StatsNotFound(PathBuf),

    /// Unrecognized `--period` argument
    #[error("invalid time range: {0}. Use: year, month, week, all, or a specific year (e.g., 2024)")]
    InvalidPeriod(String),
}

/// Result type alias for ccwrapped-core
pub type Result<T> = std::result::Result<T, Error>;
