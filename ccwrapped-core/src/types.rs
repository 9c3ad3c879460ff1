//! Input records for the digest engine
//!
//! These types mirror Claude Code's on-disk data:
//!
//! | Source | Type |
//! |--------|------|
//! | `stats-cache.json` | [`UsageStats`] (with [`DailyActivity`], [`DailyModelTokens`], [`HourCounts`], [`LongestSession`], [`ModelUsage`]) |
//! | `history.jsonl` | [`HistoryEntry`], one per line |
//!
//! Field names follow the camelCase keys of the cache so the same types
//! deserialize straight from disk. Counts are unsigned; negative values are
//! rejected when the cache is read.

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

// ============================================
// Stats cache
// ============================================

/// Activity recorded for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    /// Calendar day (unique key)
    pub date: NaiveDate,
    /// Messages exchanged that day
    #[serde(default)]
    pub message_count: u64,
    /// Sessions started that day
    #[serde(default)]
    pub session_count: u64,
    /// Tool invocations that day
    #[serde(default)]
    pub tool_call_count: u64,
}

/// Tokens consumed per model on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyModelTokens {
    pub date: NaiveDate,
    /// Model identifier -> tokens, in the order the cache lists them
    #[serde(default)]
    pub tokens_by_model: IndexMap<String, u64>,
}

/// The longest session the cache knows about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongestSession {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message_count: u64,
    /// Duration in milliseconds
    #[serde(default)]
    pub duration: u64,
    /// When the session took place
    pub timestamp: DateTime<Utc>,
}

/// Lifetime token usage for one model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelUsage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub cache_read_input_tokens: u64,
    #[serde(default)]
    pub cache_creation_input_tokens: u64,
}

/// Model identifier -> lifetime usage.
pub type ModelUsageMap = IndexMap<String, ModelUsage>;

/// Activity count per hour of day.
///
/// Only hours present in the cache are stored; absent hours count as zero.
/// Iteration is always in ascending hour order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<u32, u64>", into = "BTreeMap<u32, u64>")]
pub struct HourCounts {
    counts: BTreeMap<u8, u64>,
}

impl HourCounts {
    /// Number of hours in the domain.
    pub const HOURS: u8 = 24;

    /// Build a histogram from `(hour, count)` pairs, dropping hours outside 0-23.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, u64)>) -> Self {
        let counts = pairs
            .into_iter()
            .filter(|(hour, _)| *hour < u32::from(Self::HOURS))
            .map(|(hour, count)| (hour as u8, count))
            .collect();
        Self { counts }
    }

    /// Present `(hour, count)` pairs in ascending hour order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(hour, count)| (*hour, *count))
    }

    /// Sum of counts for every hour in `hours`.
    pub fn sum_where(&self, mut hours: impl FnMut(u8) -> bool) -> u64 {
        self.iter()
            .filter(|(hour, _)| hours(*hour))
            .fold(0, |acc, (_, count)| acc.saturating_add(count))
    }
}

impl From<BTreeMap<u32, u64>> for HourCounts {
    fn from(map: BTreeMap<u32, u64>) -> Self {
        Self::from_pairs(map)
    }
}

impl From<HourCounts> for BTreeMap<u32, u64> {
    fn from(hours: HourCounts) -> Self {
        hours
            .counts
            .into_iter()
            .map(|(hour, count)| (u32::from(hour), count))
            .collect()
    }
}

/// Snapshot of the stats cache handed to the metrics engine.
///
/// When produced by [`crate::source::RecordSource`], `daily_activity` and
/// `daily_model_tokens` are already restricted to the requested period. The
/// remaining fields are lifetime aggregates and are passed through as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    #[serde(default)]
    pub daily_activity: Vec<DailyActivity>,
    #[serde(default)]
    pub daily_model_tokens: Vec<DailyModelTokens>,
    #[serde(default)]
    pub model_usage: ModelUsageMap,
    #[serde(default)]
    pub hour_counts: HourCounts,
    #[serde(default)]
    pub longest_session: Option<LongestSession>,
    /// Lifetime session count from the cache (not period-filtered)
    #[serde(default)]
    pub total_sessions: u64,
    /// Lifetime message count from the cache (not period-filtered)
    #[serde(default)]
    pub total_messages: u64,
    #[serde(default)]
    pub first_session_date: Option<String>,
}

// ============================================
// History log
// ============================================

/// One line of `history.jsonl`: a prompt or command typed by the human.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Raw text as typed (e.g. `/plugin install foo`); `null` reads as empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub display: String,
    /// Working directory the entry was typed in
    #[serde(default)]
    pub project: Option<String>,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
