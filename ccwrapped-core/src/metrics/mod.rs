//! Metrics engine for the usage digest
//!
//! Turns an already-filtered [`UsageStats`] snapshot and history log into a
//! [`MetricsResult`]:
//! - [`activity`]: totals, streaks, most active day, longest session
//! - [`time`]: peak hours, persona, busiest weekday
//! - [`model`]: per-model tokens, preferred model, cache efficiency
//! - [`commands`]: slash-command ranking and most active project
//! - [`insights`]: achievement badges derived from the four above
//!
//! Every function here is pure. Identical inputs always give identical
//! output; nothing reads the clock or touches the filesystem.

pub mod activity;
pub mod commands;
pub mod insights;
pub mod model;
pub mod persona;
pub mod time;

use serde::{Deserialize, Serialize};

use crate::types::{HistoryEntry, UsageStats};

pub use activity::{activity_metrics, ActivityMetrics, LongestSessionSummary, MostActiveDay};
pub use commands::{command_metrics, CommandCount, CommandMetrics, ProjectActivity};
pub use insights::{generate_insights, Insight, InsightKind};
pub use model::{model_metrics, CacheEfficiency, ModelFamily, ModelMetrics, ModelShare};
pub use persona::Persona;
pub use time::{time_metrics, PeakHour, TimeMetrics};

/// The complete digest for one period.
///
/// Serializes with the same camelCase field names it is built with, so a
/// saved digest can be replayed by a renderer without the raw records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub activity: ActivityMetrics,
    pub time: TimeMetrics,
    pub model: ModelMetrics,
    pub commands: CommandMetrics,
    pub insights: Vec<Insight>,
}

impl MetricsResult {
    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a digest previously written by [`MetricsResult::to_json`].
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Calculate every metric for a filtered snapshot.
pub fn calculate_metrics(stats: &UsageStats, history: &[HistoryEntry]) -> MetricsResult {
    let activity = activity_metrics(&stats.daily_activity, stats.longest_session.as_ref());
    let time = time_metrics(&stats.hour_counts, &stats.daily_activity);
    let model = model_metrics(&stats.daily_model_tokens, &stats.model_usage);
    let commands = command_metrics(history);
    let insights = generate_insights(&activity, &time, &model, &commands);

    tracing::debug!(
        days = stats.daily_activity.len(),
        history_entries = history.len(),
        total_messages = activity.total_messages,
        longest_streak = activity.longest_streak,
        persona = time.persona.name(),
        insights = insights.len(),
        "Calculated metrics"
    );

    MetricsResult {
        activity,
        time,
        model,
        commands,
        insights,
    }
}

/// `numerator / denominator` rounded half up; 0 when the denominator is 0.
pub fn rounded_div(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    let (n, d) = (u128::from(numerator), u128::from(denominator));
    ((2 * n + d) / (2 * d)) as u64
}

/// Integer percentage of `part` in `total`, rounded half up; 0 when `total` is 0.
pub fn percentage(part: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let (p, t) = (u128::from(part), u128::from(total));
    ((200 * p + t) / (2 * t)).min(100) as u8
}

/// Sum that clamps at `u64::MAX` instead of overflowing.
pub fn saturating_sum(values: impl IntoIterator<Item = u64>) -> u64 {
    values.into_iter().fold(0, u64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DailyActivity, DailyModelTokens, HourCounts, LongestSession, ModelUsage};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn day(date: &str, messages: u64, sessions: u64) -> DailyActivity {
        DailyActivity {
            date: date.parse::<NaiveDate>().unwrap(),
            message_count: messages,
            session_count: sessions,
            tool_call_count: 1,
        }
    }

    fn busy_stats() -> UsageStats {
        let daily_activity = (1..=8)
            .map(|d| day(&format!("2024-03-{:02}", d), 120, 2))
            .collect();
        let mut tokens_by_model = indexmap::IndexMap::new();
        tokens_by_model.insert("claude-opus-4-5".to_string(), 900);
        tokens_by_model.insert("claude-sonnet-4-5".to_string(), 100);
        let mut model_usage = indexmap::IndexMap::new();
        model_usage.insert(
            "claude-opus-4-5".to_string(),
            ModelUsage {
                cache_read_input_tokens: 5_000,
                cache_creation_input_tokens: 1_000,
                ..Default::default()
            },
        );

        UsageStats {
            daily_activity,
            daily_model_tokens: vec![DailyModelTokens {
                date: "2024-03-01".parse().unwrap(),
                tokens_by_model,
            }],
            model_usage,
            hour_counts: HourCounts::from_pairs([(23, 40), (2, 30), (9, 10)]),
            longest_session: Some(LongestSession {
                session_id: None,
                message_count: 300,
                duration: 12 * 3_600_000,
                timestamp: Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_rounded_div() {
        assert_eq!(rounded_div(15, 2), 8);
        assert_eq!(rounded_div(14, 4), 4);
        assert_eq!(rounded_div(13, 4), 3);
        assert_eq!(rounded_div(5, 0), 0);
        assert_eq!(rounded_div(u64::MAX, 1), u64::MAX);
    }

    #[test]
    fn test_percentage_bounds() {
        assert_eq!(percentage(700, 1000), 70);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(u64::MAX, u64::MAX), 100);
    }

    #[test]
    fn test_saturating_sum() {
        assert_eq!(saturating_sum([1, 2, 3]), 6);
        assert_eq!(saturating_sum([u64::MAX, 1, u64::MAX]), u64::MAX);
        assert_eq!(saturating_sum(std::iter::empty()), 0);
    }

    #[test]
    fn test_calculate_metrics_composes_all_sections() {
        let history = vec![HistoryEntry {
            display: "/plugin install".to_string(),
            project: Some("/home/dev/app".to_string()),
            timestamp: 0,
        }];

        let result = calculate_metrics(&busy_stats(), &history);

        assert_eq!(result.activity.total_messages, 960);
        assert_eq!(result.activity.longest_streak, 8);
        assert_eq!(result.time.persona, Persona::NightOwl);
        assert_eq!(result.model.preferred_model.as_ref().unwrap().percentage, 90);
        assert_eq!(result.commands.total_commands, 1);

        let kinds: Vec<_> = result.insights.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                InsightKind::MarathonCoder,
                InsightKind::ConsistencyChampion,
                InsightKind::PluginEnthusiast,
                InsightKind::PowerUser,
            ]
        );
    }

    #[test]
    fn test_calculate_metrics_is_deterministic() {
        let stats = busy_stats();
        assert_eq!(calculate_metrics(&stats, &[]), calculate_metrics(&stats, &[]));
    }

    #[test]
    fn test_empty_snapshot_yields_vacuous_result() {
        let result = calculate_metrics(&UsageStats::default(), &[]);
        assert_eq!(result.activity.longest_streak, 0);
        assert!(result.activity.most_active_day.is_none());
        assert!(result.model.preferred_model.is_none());
        assert!(result.model.cache_efficiency.is_none());
        assert_eq!(result.time.persona, Persona::AfternoonOptimizer);
        assert!(result.insights.is_empty());
    }

    #[test]
    fn test_json_uses_camel_case_and_replays() {
        let result = calculate_metrics(&busy_stats(), &[]);
        let json = result.to_json().unwrap();

        assert!(json.contains("\"avgMessagesPerSession\""));
        assert!(json.contains("\"busiestDayOfWeek\""));
        assert!(json.contains("\"modelBreakdown\""));
        assert!(json.contains("\"commandDiversity\""));
        assert!(json.contains("\"mostActiveProject\": null"));

        let replayed = MetricsResult::from_json(&json).unwrap();
        assert_eq!(replayed, result);
    }
}
