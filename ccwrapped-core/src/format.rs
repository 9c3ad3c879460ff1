//! Formatting helpers shared by the engine and the renderers.

use chrono::NaiveDate;

/// Format an hour of day (0-23) as a 12-hour clock label (e.g., "3 PM").
pub fn format_hour(hour: u8) -> String {
    match hour {
        0 => "12 AM".to_string(),
        1..=11 => format!("{} AM", hour),
        12 => "12 PM".to_string(),
        _ => format!("{} PM", hour - 12),
    }
}

/// Format a date the long way (e.g., "January 5, 2024").
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format a count with thousands separators (e.g., "1,234,567").
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Short token count for chart labels (e.g., "12K").
pub fn format_tokens_short(tokens: u64) -> String {
    if tokens >= 1_000 {
        format!("{}K", crate::metrics::rounded_div(tokens, 1_000))
    } else {
        tokens.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hour() {
        assert_eq!(format_hour(0), "12 AM");
        assert_eq!(format_hour(9), "9 AM");
        assert_eq!(format_hour(12), "12 PM");
        assert_eq!(format_hour(23), "11 PM");
    }

    #[test]
    fn test_format_long_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_long_date(date), "January 5, 2024");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_tokens_short() {
        assert_eq!(format_tokens_short(950), "950");
        assert_eq!(format_tokens_short(12_499), "12K");
        assert_eq!(format_tokens_short(12_500), "13K");
    }
}
