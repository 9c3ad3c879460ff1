//! Record source: reads Claude Code's data files and restricts them to a period.
//!
//! - `stats-cache.json` is required; a missing file means Claude Code has
//!   never been run and is reported as [`Error::StatsNotFound`].
//! - `history.jsonl` is optional; a missing file yields an empty history and
//!   lines that fail to parse are skipped with a warning.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::period::TimeRange;
use crate::types::{HistoryEntry, UsageStats};

/// Reads and filters the two data sources.
#[derive(Debug, Clone)]
pub struct RecordSource {
    stats_path: PathBuf,
    history_path: PathBuf,
}

impl RecordSource {
    pub fn new(stats_path: impl Into<PathBuf>, history_path: impl Into<PathBuf>) -> Self {
        Self {
            stats_path: stats_path.into(),
            history_path: history_path.into(),
        }
    }

    /// Source using the paths from `[sources]` in the config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.sources.stats_path(), config.sources.history_path())
    }

    pub fn stats_path(&self) -> &Path {
        &self.stats_path
    }

    pub fn history_path(&self) -> &Path {
        &self.history_path
    }

    /// Load both sources restricted to `range`.
    pub fn load(&self, range: &TimeRange) -> Result<(UsageStats, Vec<HistoryEntry>)> {
        let stats = self.load_stats(range)?;
        let history = self.load_history(range)?;
        Ok((stats, history))
    }

    /// Read the stats cache, keeping only daily records inside `range`.
    pub fn load_stats(&self, range: &TimeRange) -> Result<UsageStats> {
        if !self.stats_path.exists() {
            return Err(Error::StatsNotFound(self.stats_path.clone()));
        }

        let raw = std::fs::read_to_string(&self.stats_path)?;
        let stats: UsageStats = serde_json::from_str(&raw).map_err(|e| Error::Parse {
            file: self.stats_path.display().to_string(),
            message: e.to_string(),
        })?;

        let filtered = filter_stats(stats, range);
        tracing::debug!(
            path = %self.stats_path.display(),
            period = %range.label,
            days = filtered.daily_activity.len(),
            model_days = filtered.daily_model_tokens.len(),
            "Loaded stats cache"
        );
        Ok(filtered)
    }

    /// Read the history log, keeping only entries inside `range`.
    pub fn load_history(&self, range: &TimeRange) -> Result<Vec<HistoryEntry>> {
        if !self.history_path.exists() {
            tracing::warn!(
                path = %self.history_path.display(),
                "History file not found, command stats will be limited"
            );
            return Ok(Vec::new());
        }

        let file = std::fs::File::open(&self.history_path)?;
        let entries = parse_history(std::io::BufReader::new(file))?;
        let total = entries.len();

        let filtered: Vec<HistoryEntry> = entries
            .into_iter()
            .filter(|entry| range.contains_timestamp_ms(entry.timestamp))
            .collect();

        tracing::debug!(
            path = %self.history_path.display(),
            period = %range.label,
            total,
            kept = filtered.len(),
            "Loaded history"
        );
        Ok(filtered)
    }
}

/// Restrict the per-day collections of a snapshot to `range`.
///
/// Lifetime fields (hour counts, model usage, longest session, totals) are
/// not dated per day in the cache and pass through unchanged.
pub fn filter_stats(mut stats: UsageStats, range: &TimeRange) -> UsageStats {
    stats
        .daily_activity
        .retain(|day| range.contains_date(day.date));
    stats
        .daily_model_tokens
        .retain(|day| range.contains_date(day.date));
    stats
}

/// Parse JSONL history. Blank lines are ignored; lines that are not valid
/// UTF-8 or not valid JSON are skipped with a warning. Only I/O failures
/// from the underlying reader are returned as errors.
pub fn parse_history(reader: impl BufRead) -> Result<Vec<HistoryEntry>> {
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for (index, line_result) in reader.lines().enumerate() {
        let line = match line_result {
            Ok(line) => line,
            // The undecodable line has already been consumed
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                skipped += 1;
                tracing::warn!(line = index + 1, error = %e, "Skipping undecodable history line");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match serde_json::from_str::<HistoryEntry>(trimmed) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                skipped += 1;
                tracing::warn!(line = index + 1, error = %e, "Failed to parse history line");
            }
        }
    }

    if skipped > 0 {
        tracing::info!(skipped, parsed = entries.len(), "Skipped malformed history lines");
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging;
    use crate::period::Period;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::io::Cursor;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_history_skips_blank_and_malformed() {
        logging::init_test();
        let input = concat!(
            r#"{"display":"/clear","project":"/p","timestamp":1}"#,
            "\n\n",
            "not json\n",
            r#"{"display":"hi"}"#,
            "\n",
            r#"{"display":"ok","timestamp":2,"pastedContents":{}}"#,
            "\n",
        );
        let entries = parse_history(Cursor::new(input)).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].display, "/clear");
        assert_eq!(entries[1].timestamp, 2);
    }

    #[test]
    fn test_parse_history_skips_invalid_utf8_line() {
        logging::init_test();
        let mut input = br#"{"display":"/clear","timestamp":1}"#.to_vec();
        input.push(b'\n');
        input.extend_from_slice(b"{\"display\":\"caf\xe9\",\"timestamp\":2}\n");
        input.extend_from_slice(br#"{"display":"/plugin","timestamp":3}"#);
        input.push(b'\n');

        let entries = parse_history(Cursor::new(input)).unwrap();
        let displays: Vec<_> = entries.iter().map(|e| e.display.as_str()).collect();
        assert_eq!(displays, vec!["/clear", "/plugin"]);
    }

    #[test]
    fn test_parse_history_keeps_null_display() {
        let input = concat!(
            r#"{"display":null,"project":"/p","timestamp":1}"#,
            "\n",
            r#"{"display":"/clear","timestamp":2}"#,
            "\n",
        );
        let entries = parse_history(Cursor::new(input)).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].display, "");
    }

    #[test]
    fn test_filter_stats_keeps_lifetime_fields() {
        let json = r#"{
            "dailyActivity": [
                {"date": "2023-12-31", "messageCount": 1},
                {"date": "2024-06-01", "messageCount": 2}
            ],
            "dailyModelTokens": [
                {"date": "2025-01-01", "tokensByModel": {"opus": 5}}
            ],
            "hourCounts": {"3": 9},
            "totalMessages": 3
        }"#;
        let stats: UsageStats = serde_json::from_str(json).unwrap();
        let range = Period::CalendarYear(2024).resolve(now());
        let filtered = filter_stats(stats, &range);

        assert_eq!(filtered.daily_activity.len(), 1);
        assert_eq!(filtered.daily_activity[0].message_count, 2);
        assert!(filtered.daily_model_tokens.is_empty());
        assert_eq!(filtered.hour_counts.iter().collect::<Vec<_>>(), vec![(3, 9)]);
        assert_eq!(filtered.total_messages, 3);
    }

    #[test]
    fn test_missing_stats_is_an_error() {
        let source = RecordSource::new("/nonexistent/stats-cache.json", "/nonexistent/h.jsonl");
        let err = source.load_stats(&Period::All.resolve(now())).unwrap_err();
        assert!(matches!(err, Error::StatsNotFound(_)));
        assert!(err.to_string().contains("Have you used Claude Code yet?"));
    }

    #[test]
    fn test_from_config_uses_source_overrides() {
        let config: Config = toml::from_str(
            r#"
[sources]
claude_dir = "/data/claude"
stats_path = "/elsewhere/stats.json"
"#,
        )
        .unwrap();
        let source = RecordSource::from_config(&config);
        assert_eq!(source.stats_path(), Path::new("/elsewhere/stats.json"));
        assert_eq!(source.history_path(), Path::new("/data/claude/history.jsonl"));
    }

    #[test]
    fn test_missing_history_is_empty() {
        logging::init_test();
        let source = RecordSource::new("/nonexistent/stats-cache.json", "/nonexistent/h.jsonl");
        let history = source.load_history(&Period::All.resolve(now())).unwrap();
        assert!(history.is_empty());
    }
}
