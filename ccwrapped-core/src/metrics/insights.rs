//! Achievement badges.
//!
//! Each rule looks at the finished aggregates and adds at most one badge.
//! Rules run in a fixed order, which is the order badges are displayed in.

use serde::{Deserialize, Serialize};

use super::{ActivityMetrics, CommandMetrics, ModelMetrics, TimeMetrics};

/// Longest session must exceed this many (rounded) hours.
pub const MARATHON_HOURS: u64 = 10;
/// Minimum streak for the consistency badge.
pub const CONSISTENCY_STREAK_DAYS: u64 = 7;
/// Minimum distinct slash commands for the explorer badge.
pub const EXPLORER_DIVERSITY: u64 = 10;
/// Average messages per session must exceed this.
pub const POWER_USER_AVG_MESSAGES: u64 = 50;
/// Top command that earns the plugin badge.
pub const PLUGIN_COMMAND: &str = "/plugin";

/// Kinds of badge, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    MarathonCoder,
    ConsistencyChampion,
    FeatureExplorer,
    PluginEnthusiast,
    PowerUser,
}

impl InsightKind {
    pub fn title(&self) -> &'static str {
        match self {
            InsightKind::MarathonCoder => "Marathon Coder",
            InsightKind::ConsistencyChampion => "Consistency Champion",
            InsightKind::FeatureExplorer => "Feature Explorer",
            InsightKind::PluginEnthusiast => "Plugin Enthusiast",
            InsightKind::PowerUser => "Power User",
        }
    }
}

/// A badge with its display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
}

impl Insight {
    fn new(kind: InsightKind, description: String) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            description,
        }
    }
}

/// Evaluate every badge rule against the aggregates.
///
/// Time and model metrics are accepted so every aggregate is available to
/// the rules, though none of the current badges depend on them.
pub fn generate_insights(
    activity: &ActivityMetrics,
    _time: &TimeMetrics,
    _model: &ModelMetrics,
    commands: &CommandMetrics,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    if let Some(session) = &activity.longest_session {
        if session.duration_hours > MARATHON_HOURS {
            insights.push(Insight::new(
                InsightKind::MarathonCoder,
                format!(
                    "Your longest session lasted {} hours! That's dedication!",
                    session.duration_hours
                ),
            ));
        }
    }

    if activity.longest_streak >= CONSISTENCY_STREAK_DAYS {
        insights.push(Insight::new(
            InsightKind::ConsistencyChampion,
            format!(
                "{} day coding streak! You're on fire!",
                activity.longest_streak
            ),
        ));
    }

    if commands.command_diversity >= EXPLORER_DIVERSITY {
        insights.push(Insight::new(
            InsightKind::FeatureExplorer,
            format!(
                "You used {} different commands. You know Claude Code well!",
                commands.command_diversity
            ),
        ));
    } else if commands
        .top_commands
        .first()
        .is_some_and(|top| top.command == PLUGIN_COMMAND)
    {
        insights.push(Insight::new(
            InsightKind::PluginEnthusiast,
            format!(
                "You love exploring plugins! {} was your top command.",
                PLUGIN_COMMAND
            ),
        ));
    }

    if activity.avg_messages_per_session > POWER_USER_AVG_MESSAGES {
        insights.push(Insight::new(
            InsightKind::PowerUser,
            format!(
                "Average of {} messages per session. You get things done!",
                activity.avg_messages_per_session
            ),
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{CommandCount, LongestSessionSummary, Persona};
    use chrono::{TimeZone, Utc};

    fn time() -> TimeMetrics {
        TimeMetrics {
            peak_hours: vec![],
            persona: Persona::AfternoonOptimizer,
            busiest_day_of_week: None,
        }
    }

    fn session(hours: u64) -> LongestSessionSummary {
        LongestSessionSummary {
            message_count: 10,
            duration: hours * 3_600_000,
            duration_hours: hours,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            date: "January 1, 2024".to_string(),
        }
    }

    fn commands(diversity: u64, top: &str) -> CommandMetrics {
        CommandMetrics {
            top_commands: vec![CommandCount {
                command: top.to_string(),
                count: 3,
            }],
            command_diversity: diversity,
            total_commands: 3,
            most_active_project: None,
        }
    }

    fn evaluate(activity: &ActivityMetrics, commands: &CommandMetrics) -> Vec<Insight> {
        generate_insights(activity, &time(), &ModelMetrics::default(), commands)
    }

    fn kinds(insights: &[Insight]) -> Vec<InsightKind> {
        insights.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn test_no_triggers_no_insights() {
        let insights = evaluate(&ActivityMetrics::default(), &CommandMetrics::default());
        assert!(insights.is_empty());
    }

    #[test]
    fn test_rule_thresholds() {
        let activity = ActivityMetrics {
            longest_session: Some(session(10)),
            longest_streak: 6,
            avg_messages_per_session: 50,
            ..Default::default()
        };
        let none = evaluate(&activity, &commands(9, "/clear"));
        assert!(none.is_empty());

        let activity = ActivityMetrics {
            longest_session: Some(session(11)),
            longest_streak: 7,
            avg_messages_per_session: 51,
            ..Default::default()
        };
        let all = evaluate(&activity, &commands(10, "/clear"));
        assert_eq!(
            kinds(&all),
            vec![
                InsightKind::MarathonCoder,
                InsightKind::ConsistencyChampion,
                InsightKind::FeatureExplorer,
                InsightKind::PowerUser,
            ]
        );
        assert_eq!(
            all[0].description,
            "Your longest session lasted 11 hours! That's dedication!"
        );
        assert_eq!(all[1].description, "7 day coding streak! You're on fire!");
        assert_eq!(all[3].title, "Power User");
    }

    #[test]
    fn test_plugin_enthusiast_only_without_explorer() {
        let activity = ActivityMetrics::default();

        let plugin = evaluate(&activity, &commands(3, "/plugin"));
        assert_eq!(kinds(&plugin), vec![InsightKind::PluginEnthusiast]);
        assert_eq!(
            plugin[0].description,
            "You love exploring plugins! /plugin was your top command."
        );

        let explorer = evaluate(&activity, &commands(12, "/plugin"));
        assert_eq!(kinds(&explorer), vec![InsightKind::FeatureExplorer]);

        let near_miss = evaluate(&activity, &commands(3, "/plugins"));
        assert!(near_miss.is_empty());
    }

    #[test]
    fn test_insight_kind_serializes_snake_case() {
        let json = serde_json::to_string(&InsightKind::ConsistencyChampion).unwrap();
        assert_eq!(json, "\"consistency_champion\"");
    }
}
