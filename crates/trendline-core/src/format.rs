// File: crates/trendline-core/src/format.rs
// Summary: Date and number formatting for axis labels, titles and tooltip rows (UTC).

use chrono::{DateTime, Utc};

use crate::types::{DAY, HOUR};

/// Resolution of the date labels on the horizontal axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateScale {
    Day,
    Hour,
}

impl DateScale {
    /// Spacing assumed when the axis has a single sample.
    pub fn interval(self) -> f64 {
        match self {
            DateScale::Day => DAY,
            DateScale::Hour => HOUR,
        }
    }

    pub fn format_label(self, timestamp: f64) -> String {
        match self {
            DateScale::Day => format_utc(timestamp, "%b %-d"),
            DateScale::Hour => format_utc(timestamp, "%H:%M"),
        }
    }
}

fn to_utc(timestamp: f64) -> DateTime<Utc> {
    let secs = timestamp.floor();
    let nanos = ((timestamp - secs) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
    DateTime::from_timestamp(secs as i64, nanos).unwrap_or(DateTime::UNIX_EPOCH)
}

pub fn format_utc(timestamp: f64, pattern: &str) -> String {
    to_utc(timestamp).format(pattern).to_string()
}

pub fn same_utc_day(a: f64, b: f64) -> bool {
    to_utc(a).date_naive() == to_utc(b).date_naive()
}

/// Header title for a visible range; collapses to one full date inside a single day.
pub fn range_title(lower: f64, upper: f64) -> String {
    // Bounds sitting exactly on midnight belong to the previous day's window.
    let from = lower + 1.0;
    if same_utc_day(from, upper) {
        format_utc(from, "%A, %-d %b %Y")
    } else {
        format!("{} - {}", format_utc(from, "%-d %b %Y"), format_utc(upper, "%-d %b %Y"))
    }
}

/// Tooltip title for a sample timestamp.
pub fn details_title(timestamp: f64, zoomed: bool) -> String {
    if zoomed { format_utc(timestamp, "%H:%M") } else { format_utc(timestamp, "%a, %-d %b") }
}

/// Group the integer part by thousands: `1234567.5` -> `1 234 567.5`.
pub fn format_grouped(value: f64) -> String {
    let text = format_decimals(value, 2);
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// At most `max_decimals` fraction digits, trailing zeros trimmed.
pub fn format_decimals(value: f64, max_decimals: usize) -> String {
    let text = format!("{:.*}", max_decimals, value);
    let text = if text.contains('.') { text.trim_end_matches('0').trim_end_matches('.').to_string() } else { text };
    if text == "-0" { "0".to_string() } else { text }
}

/// Compact axis value: `1500` -> `1.5K`, `2500000` -> `2.5M`.
pub fn format_compact(value: f64, max_decimals: usize) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{}M", format_decimals(value / 1_000_000.0, max_decimals.max(1)))
    } else if abs >= 1_000.0 {
        format!("{}K", format_decimals(value / 1_000.0, max_decimals.max(1)))
    } else {
        format_decimals(value, max_decimals)
    }
}
