//! Time periods for a wrapped digest.
//!
//! A [`Period`] is what the user asks for (`--period month`); resolving it
//! against an injected "now" yields the concrete [`TimeRange`] the record
//! source filters by. Ranges are inclusive on both ends and expressed in
//! local wall-clock time, matching how Claude Code keys its daily records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Error, Result};

/// The period a digest covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Current calendar year, up to now
    Year,
    /// Last 30 days
    Month,
    /// Last 7 days
    Week,
    /// Everything since 2000-01-01
    All,
    /// A specific calendar year (e.g., 2024)
    CalendarYear(i32),
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(arg: &str) -> Result<Self> {
        match arg {
            "" | "year" => Ok(Period::Year),
            "month" => Ok(Period::Month),
            "week" => Ok(Period::Week),
            "all" => Ok(Period::All),
            _ if arg.len() == 4 && arg.bytes().all(|b| b.is_ascii_digit()) => arg
                .parse()
                .map(Period::CalendarYear)
                .map_err(|_| Error::InvalidPeriod(arg.to_string())),
            _ => Err(Error::InvalidPeriod(arg.to_string())),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Year => write!(f, "year"),
            Period::Month => write!(f, "month"),
            Period::Week => write!(f, "week"),
            Period::All => write!(f, "all"),
            Period::CalendarYear(year) => write!(f, "{}", year),
        }
    }
}

impl Period {
    /// Resolve this period into a concrete range, relative to `now`.
    pub fn resolve(&self, now: NaiveDateTime) -> TimeRange {
        match self {
            Period::Year => TimeRange {
                start: start_of_year(now.year()),
                end: now,
                label: now.year().to_string(),
            },
            Period::Month => TimeRange {
                start: now - Duration::days(30),
                end: now,
                label: "Last 30 Days".to_string(),
            },
            Period::Week => TimeRange {
                start: now - Duration::days(7),
                end: now,
                label: "Last 7 Days".to_string(),
            },
            Period::All => TimeRange {
                start: start_of_year(2000),
                end: now,
                label: "All Time".to_string(),
            },
            Period::CalendarYear(year) => TimeRange {
                start: start_of_year(*year),
                end: end_of_year(*year),
                label: year.to_string(),
            },
        }
    }

    /// Resolve against the local clock.
    pub fn resolve_now(&self) -> TimeRange {
        self.resolve(Local::now().naive_local())
    }
}

fn start_of_year(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .unwrap_or(NaiveDate::MIN)
        .and_time(NaiveTime::MIN)
}

fn end_of_year(year: i32) -> NaiveDateTime {
    let last_instant = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    NaiveDate::from_ymd_opt(year, 12, 31)
        .unwrap_or(NaiveDate::MAX)
        .and_time(last_instant)
}

/// Concrete, inclusive time window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Display label (e.g., "Last 30 Days")
    pub label: String,
}

impl TimeRange {
    /// Whether a local wall-clock instant falls inside the range.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }

    /// Whether a calendar day (taken at local midnight) falls inside the range.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(date.and_time(NaiveTime::MIN))
    }

    /// Whether a Unix timestamp in milliseconds falls inside the range.
    pub fn contains_timestamp_ms(&self, millis: i64) -> bool {
        DateTime::from_timestamp_millis(millis)
            .map(|ts| self.contains(ts.with_timezone(&Local).naive_local()))
            .unwrap_or(false)
    }
}
