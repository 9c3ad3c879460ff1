//! Terminal rendering of a wrapped digest.
//!
//! Each section is printed as a boxed card. Renderers only read the finished
//! [`MetricsResult`]; the raw daily records are used for the calendar alone.

use std::collections::HashMap;

use ccwrapped_core::format::{format_number, format_tokens_short};
use ccwrapped_core::metrics::{
    ActivityMetrics, CommandMetrics, Insight, ModelMetrics, PeakHour, TimeMetrics,
};
use ccwrapped_core::{DailyActivity, MetricsResult, TimeRange, UsageStats};
use chrono::{Datelike, Duration, NaiveDate};

const CARD_WIDTH: usize = 60;
const BAR_WIDTH: usize = 30;
const CALENDAR_WEEKS: i64 = 4;

/// Print every card for a digest.
pub fn print_wrapped(metrics: &MetricsResult, stats: &UsageStats, range: &TimeRange) {
    print_card(&title_card(&range.label));
    print_card(&activity_card(&metrics.activity, &stats.daily_activity));
    print_card(&time_card(&metrics.time));
    print_card(&model_card(&metrics.model));
    print_card(&command_card(&metrics.commands));
    if !metrics.insights.is_empty() {
        print_card(&insights_card(&metrics.insights));
    }
    print_card(&summary_card(&metrics.activity, &range.label));
}

fn print_card(lines: &[String]) {
    println!("╭{}╮", "─".repeat(CARD_WIDTH));
    for line in lines {
        println!("  {}", line);
    }
    println!("╰{}╯", "─".repeat(CARD_WIDTH));
    println!();
}

fn title_card(label: &str) -> Vec<String> {
    vec![
        String::new(),
        format!("{:^width$}", "🎉 CLAUDE CODE WRAPPED 🎉", width = CARD_WIDTH - 4),
        format!("{:^width$}", format!("Your {} in Code", label), width = CARD_WIDTH - 4),
        String::new(),
    ]
}

fn activity_card(activity: &ActivityMetrics, daily: &[DailyActivity]) -> Vec<String> {
    let mut lines = vec![
        "📊 YOUR CODING ACTIVITY".to_string(),
        String::new(),
        format!(
            "You sent {} messages across {} sessions",
            format_number(activity.total_messages),
            format_number(activity.total_sessions)
        ),
        format!("Made {} tool calls", format_number(activity.total_tool_calls)),
        format!("Active on {} unique days", activity.days_active),
    ];

    if !daily.is_empty() {
        lines.push(String::new());
        lines.push("Activity Calendar:".to_string());
        lines.extend(calendar_heatmap(daily, CALENDAR_WEEKS));
    }

    if let Some(day) = &activity.most_active_day {
        lines.push(String::new());
        lines.push(format!(
            "Most active day: {} ({} messages)",
            day.date,
            format_number(day.message_count)
        ));
    }

    lines
}

fn time_card(time: &TimeMetrics) -> Vec<String> {
    let mut lines = vec!["⏰ YOUR PEAK CODING HOURS".to_string(), String::new()];

    if !time.peak_hours.is_empty() {
        lines.push("You code most at:".to_string());
        lines.extend(hour_distribution(&time.peak_hours));
        lines.push(String::new());
    }

    lines.push(format!(
        "Your Persona: {} {}",
        time.persona.emoji(),
        time.persona.name()
    ));
    lines.push(format!("({})", time.persona.description()));

    if let Some(day) = &time.busiest_day_of_week {
        lines.push(format!("Busiest day: {}", day));
    }

    lines
}

fn model_card(model: &ModelMetrics) -> Vec<String> {
    let mut lines = vec!["🤖 YOUR AI COMPANIONS".to_string(), String::new()];

    for share in &model.model_breakdown {
        lines.push(format!(
            "{:<20} {}  ({} tokens)",
            share.name,
            percentage_bar(share.percentage, BAR_WIDTH),
            format_tokens_short(share.tokens)
        ));
    }
    if !model.model_breakdown.is_empty() {
        lines.push(String::new());
    }

    lines.push(format!("Total Tokens: {}", format_number(model.total_tokens)));
    if let Some(cache) = &model.cache_efficiency {
        lines.push(format!(
            "Cache Hits: {} tokens",
            format_number(cache.cache_read_tokens)
        ));
        lines.push(format!("Cache Efficiency: {}x", cache.efficiency_ratio));
    }

    lines
}

fn command_card(commands: &CommandMetrics) -> Vec<String> {
    let mut lines = vec!["🔧 YOUR TOP COMMANDS".to_string(), String::new()];

    if commands.top_commands.is_empty() {
        lines.push("No command history available".to_string());
    } else {
        let items: Vec<(&str, u64)> = commands
            .top_commands
            .iter()
            .map(|c| (c.command.as_str(), c.count))
            .collect();
        lines.extend(bar_chart(&items, BAR_WIDTH));
    }

    if commands.command_diversity > 0 {
        lines.push(String::new());
        lines.push(format!(
            "Command Diversity: {} unique commands",
            commands.command_diversity
        ));
    }

    if let Some(project) = &commands.most_active_project {
        lines.push(String::new());
        lines.push(format!("Most Active Project: {}", project.name));
        lines.push(format!("  {}", project.path));
    }

    lines
}

fn insights_card(insights: &[Insight]) -> Vec<String> {
    let mut lines = vec!["💡 SPECIAL ACHIEVEMENTS".to_string()];
    for insight in insights {
        lines.push(String::new());
        lines.push(format!("🏆 {}", insight.title));
        lines.push(format!("   {}", insight.description));
    }
    lines
}

fn summary_card(activity: &ActivityMetrics, label: &str) -> Vec<String> {
    let mut lines = vec![format!("🎯 YOUR {} SUMMARY", label.to_uppercase()), String::new()];

    if let Some(session) = &activity.longest_session {
        lines.push(format!(
            "🏆 Longest Session: {} messages over {} hours",
            session.message_count, session.duration_hours
        ));
        lines.push(format!("   On {}", session.date));
    }

    if activity.longest_streak > 1 {
        lines.push(format!(
            "🔥 Longest Streak: {} days",
            activity.longest_streak
        ));
    }

    lines.push(String::new());
    lines.push("Keep coding! 🚀".to_string());
    lines
}

/// Horizontal bars scaled to the largest value.
fn bar_chart(items: &[(&str, u64)], width: usize) -> Vec<String> {
    let max = items.iter().map(|(_, value)| *value).max().unwrap_or(0);
    if max == 0 {
        return Vec::new();
    }

    items
        .iter()
        .map(|(label, value)| {
            let filled = scaled(*value, max, width);
            format!(
                "{:<12} {}{} {}",
                label,
                "█".repeat(filled),
                "░".repeat(width - filled),
                value
            )
        })
        .collect()
}

/// Numbered peak hours with bars scaled to the busiest.
fn hour_distribution(peaks: &[PeakHour]) -> Vec<String> {
    let max = peaks.iter().map(|p| p.count).max().unwrap_or(0);
    peaks
        .iter()
        .enumerate()
        .map(|(i, peak)| {
            format!(
                "{}. {:<7} {} ({} sessions)",
                i + 1,
                peak.hour,
                "█".repeat(scaled(peak.count, max, BAR_WIDTH)),
                peak.count
            )
        })
        .collect()
}

/// Bar filled to `percentage` of `width`, followed by the percentage.
fn percentage_bar(percentage: u8, width: usize) -> String {
    let filled = scaled(u64::from(percentage), 100, width);
    format!(
        "{}{} {}%",
        "█".repeat(filled),
        "░".repeat(width - filled),
        percentage
    )
}

/// Calendar of the last `weeks` weeks ending at the latest recorded day.
/// Rows run Sunday to Saturday.
fn calendar_heatmap(daily: &[DailyActivity], weeks: i64) -> Vec<String> {
    let Some(latest) = daily.iter().map(|d| d.date).max() else {
        return Vec::new();
    };
    let max = daily.iter().map(|d| d.message_count).max().unwrap_or(0);

    let mut counts: HashMap<NaiveDate, u64> = HashMap::new();
    for day in daily {
        let count = counts.entry(day.date).or_insert(0);
        *count = count.saturating_add(day.message_count);
    }

    let last_sunday =
        latest - Duration::days(i64::from(latest.weekday().num_days_from_sunday()));
    let first_sunday = last_sunday - Duration::weeks(weeks - 1);

    let mut lines = vec![format!(
        "{:<8}{}",
        "",
        ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
            .iter()
            .map(|d| format!("{:<4}", d))
            .collect::<String>()
    )];

    for week in 0..weeks {
        let week_start = first_sunday + Duration::weeks(week);
        let mut line = format!("{:<8}", week_start.format("%b %-d").to_string());
        for offset in 0..7 {
            let date = week_start + Duration::days(offset);
            let count = counts.get(&date).copied().unwrap_or(0);
            line.push_str(heat_cell(count, max));
            line.push_str("  ");
        }
        lines.push(line.trim_end().to_string());
    }

    lines
}

fn heat_cell(count: u64, max: u64) -> &'static str {
    if count == 0 || max == 0 {
        return "░░";
    }
    let intensity = count as f64 / max as f64;
    if intensity < 0.25 {
        "▒▒"
    } else if intensity < 0.5 {
        "▓▓"
    } else {
        "██"
    }
}

fn scaled(value: u64, max: u64, width: usize) -> usize {
    if max == 0 {
        return 0;
    }
    ((value.min(max) as f64 / max as f64) * width as f64).floor() as usize
}
