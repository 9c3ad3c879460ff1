//! ccwrapped - Claude Code Wrapped CLI
//!
//! Generate a Spotify Wrapped-style digest of your Claude Code usage.

mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ccwrapped_core::{calculate_metrics, Config, MetricsResult, Period, RecordSource, TimeRange};
use clap::Parser;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "ccwrapped")]
#[command(about = "Claude Code Wrapped - Your Year in Code")]
#[command(version)]
struct Args {
    /// Period to cover: year, month, week, all, or a specific year (e.g., 2024)
    #[arg(long)]
    period: Option<String>,

    /// Write the digest as JSON to this path instead of printing cards
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Override the location of stats-cache.json
    #[arg(long, value_name = "PATH")]
    stats_path: Option<PathBuf>,

    /// Override the location of history.jsonl
    #[arg(long, value_name = "PATH")]
    history_path: Option<PathBuf>,
}

/// JSON export: the digest plus the period it covers.
#[derive(Serialize)]
struct WrappedExport<'a> {
    period: &'a str,
    #[serde(flatten)]
    metrics: &'a MetricsResult,
}

fn main() {
    let args = Args::parse();
    let json_mode = args.json.is_some();

    if let Err(err) = run(args) {
        eprintln!("\nError: {:#}", err);
        if !json_mode {
            eprintln!("\nMake sure you have used Claude Code before running ccwrapped.");
            eprintln!("Data files are stored in ~/.claude/\n");
        }
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = ccwrapped_core::logging::init(&config.logging).ok();

    let period_arg = args
        .period
        .as_deref()
        .unwrap_or(config.wrapped.default_period.as_str());
    let period: Period = period_arg.parse()?;
    let range = period.resolve_now();

    let mut sources = config.sources.clone();
    if let Some(path) = args.stats_path {
        sources.stats_path = Some(path);
    }
    if let Some(path) = args.history_path {
        sources.history_path = Some(path);
    }
    let source = RecordSource::new(sources.stats_path(), sources.history_path());

    tracing::info!(
        period = %period,
        stats = %source.stats_path().display(),
        history = %source.history_path().display(),
        "Generating wrapped"
    );

    if args.json.is_none() {
        println!("Loading your Claude Code data...\n");
    }

    let (stats, history) = source
        .load(&range)
        .context("failed to load Claude Code data")?;
    let metrics = calculate_metrics(&stats, &history);

    match &args.json {
        Some(path) => write_json(path, &metrics, &range),
        None => {
            render::print_wrapped(&metrics, &stats, &range);
            println!("Thanks for using Claude Code Wrapped! 🎉\n");
            Ok(())
        }
    }
}

/// Write the digest to `path`, creating parent directories. Silent on success.
fn write_json(path: &Path, metrics: &MetricsResult, range: &TimeRange) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }

    let export = WrappedExport {
        period: &range.label,
        metrics,
    };
    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "Wrote wrapped JSON");
    Ok(())
}
