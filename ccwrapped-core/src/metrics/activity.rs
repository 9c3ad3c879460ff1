//! Activity metrics: totals, streaks, and standout days.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{rounded_div, saturating_sum};
use crate::format::format_long_date;
use crate::types::{DailyActivity, LongestSession};

const MILLIS_PER_HOUR: u64 = 60 * 60 * 1000;

/// Aggregate activity for a period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityMetrics {
    pub total_messages: u64,
    pub total_sessions: u64,
    pub total_tool_calls: u64,
    /// Messages per session, rounded (0 when there were no sessions)
    pub avg_messages_per_session: u64,
    pub most_active_day: Option<MostActiveDay>,
    /// Distinct days with a record
    pub days_active: u64,
    /// Longest run of consecutive calendar days with a record
    pub longest_streak: u64,
    pub longest_session: Option<LongestSessionSummary>,
}

/// The day with the most messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MostActiveDay {
    /// Long-form date (e.g., "March 4, 2024")
    pub date: String,
    pub message_count: u64,
}

/// Display view of the cache's longest-session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongestSessionSummary {
    pub message_count: u64,
    /// Duration in milliseconds
    pub duration: u64,
    /// Duration rounded to whole hours
    pub duration_hours: u64,
    pub timestamp: DateTime<Utc>,
    /// Long-form date of `timestamp`, in UTC
    pub date: String,
}

impl LongestSessionSummary {
    pub fn from_record(session: &LongestSession) -> Self {
        Self {
            message_count: session.message_count,
            duration: session.duration,
            duration_hours: rounded_div(session.duration, MILLIS_PER_HOUR),
            timestamp: session.timestamp,
            date: format_long_date(session.timestamp.date_naive()),
        }
    }
}

/// Calculate activity metrics from daily records (in any order).
pub fn activity_metrics(
    daily: &[DailyActivity],
    longest_session: Option<&LongestSession>,
) -> ActivityMetrics {
    let total_messages = saturating_sum(daily.iter().map(|day| day.message_count));
    let total_sessions = saturating_sum(daily.iter().map(|day| day.session_count));
    let total_tool_calls = saturating_sum(daily.iter().map(|day| day.tool_call_count));

    let days_active = daily.iter().map(|day| day.date).collect::<BTreeSet<_>>().len() as u64;

    ActivityMetrics {
        total_messages,
        total_sessions,
        total_tool_calls,
        avg_messages_per_session: rounded_div(total_messages, total_sessions),
        most_active_day: most_active_day(daily),
        days_active,
        longest_streak: longest_streak(daily),
        longest_session: longest_session.map(LongestSessionSummary::from_record),
    }
}

/// First day whose message count beats every earlier one.
///
/// The running maximum starts at zero, so days without messages never win.
pub fn most_active_day(daily: &[DailyActivity]) -> Option<MostActiveDay> {
    let mut best: Option<&DailyActivity> = None;
    for day in daily {
        let current_max = best.map(|b| b.message_count).unwrap_or(0);
        if day.message_count > current_max {
            best = Some(day);
        }
    }
    best.map(|day| MostActiveDay {
        date: format_long_date(day.date),
        message_count: day.message_count,
    })
}

/// Longest run of calendar-consecutive days.
///
/// Records are sorted by date first. A gap of exactly one day extends the
/// run; anything else, including a repeated date, starts a new run.
pub fn longest_streak(daily: &[DailyActivity]) -> u64 {
    if daily.is_empty() {
        return 0;
    }

    let mut dates: Vec<NaiveDate> = daily.iter().map(|day| day.date).collect();
    dates.sort_unstable();

    let mut longest = 1u64;
    let mut streak = 1u64;
    for pair in dates.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            streak += 1;
            longest = longest.max(streak);
        } else {
            streak = 1;
        }
    }

    longest
}
