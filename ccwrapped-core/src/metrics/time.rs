//! Time-of-day and day-of-week patterns.

use chrono::{Datelike, Weekday};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Persona;
use crate::format::format_hour;
use crate::types::{DailyActivity, HourCounts};

/// Number of peak hours reported.
pub const PEAK_HOURS: usize = 3;

/// Time-based usage patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeMetrics {
    /// Busiest hours, most active first
    pub peak_hours: Vec<PeakHour>,
    pub persona: Persona,
    /// e.g. "Tuesday"; `None` without daily records
    pub busiest_day_of_week: Option<String>,
}

/// One of the busiest hours of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakHour {
    /// 12-hour clock label (e.g., "2 PM")
    pub hour: String,
    /// Hour of day, 0-23
    pub hour_num: u8,
    pub count: u64,
}

/// Calculate time patterns from the hour histogram and daily records.
pub fn time_metrics(hours: &HourCounts, daily: &[DailyActivity]) -> TimeMetrics {
    TimeMetrics {
        peak_hours: peak_hours(hours),
        persona: Persona::classify(hours),
        busiest_day_of_week: busiest_day_of_week(daily).map(|day| day_name(day).to_string()),
    }
}

/// Top hours by count. Equal counts keep ascending hour order.
pub fn peak_hours(hours: &HourCounts) -> Vec<PeakHour> {
    let mut ranked: Vec<(u8, u64)> = hours.iter().collect();
    // Stable sort keeps the ascending-hour iteration order among ties
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(PEAK_HOURS)
        .map(|(hour, count)| PeakHour {
            hour: format_hour(hour),
            hour_num: hour,
            count,
        })
        .collect()
}

/// Weekday with the most messages; ties go to the weekday seen first.
pub fn busiest_day_of_week(daily: &[DailyActivity]) -> Option<Weekday> {
    let per_weekday = daily
        .iter()
        .fold(IndexMap::<Weekday, u64>::new(), |mut acc, day| {
            let total = acc.entry(day.date.weekday()).or_insert(0);
            *total = total.saturating_add(day.message_count);
            acc
        });

    let mut busiest: Option<(Weekday, u64)> = None;
    for (weekday, count) in per_weekday {
        if busiest.map_or(true, |(_, best)| count > best) {
            busiest = Some((weekday, count));
        }
    }
    busiest.map(|(weekday, _)| weekday)
}

/// Get the full English name of a weekday.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
