use std::sync::OnceLock;

use chrono::{DateTime, Datelike, FixedOffset, Local, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use regex::Regex;
use thiserror::Error;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

static UTC_OFFSET: OnceLock<Regex> = OnceLock::new();

fn utc_offset_pattern() -> &'static Regex {
    UTC_OFFSET.get_or_init(|| Regex::new(r"^UTC([+-])(\d{1,2}):(\d{2})$").unwrap())
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OffsetError {
    #[error("invalid UTC format: {label}")]
    Format { label: String },

    #[error("UTC offset out of range: {label}")]
    OutOfRange { label: String },
}

/// Parses `UTC`, `UTC+05:30`, `UTC-3:00` and friends into a fixed offset.
pub fn parse_utc_offset(label: &str) -> Result<FixedOffset, OffsetError> {
    let label = label.trim();
    let out_of_range = || OffsetError::OutOfRange {
        label: label.to_string(),
    };

    let seconds = if label == "UTC" {
        0
    } else {
        let caps = utc_offset_pattern()
            .captures(label)
            .ok_or_else(|| OffsetError::Format {
                label: label.to_string(),
            })?;
        let hours: i32 = caps[2].parse().map_err(|_| out_of_range())?;
        let minutes: i32 = caps[3].parse().map_err(|_| out_of_range())?;
        if hours > 14 || minutes > 59 {
            return Err(out_of_range());
        }
        let sign = if &caps[1] == "-" { -1 } else { 1 };
        sign * (hours * 3600 + minutes * 60)
    };
    FixedOffset::east_opt(seconds).ok_or_else(out_of_range)
}

pub fn ordinal_suffix(day: u32) -> &'static str {
    if matches!(day % 100, 11..=13) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// `29th Dec 2024, 14:20`
pub fn format_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    let day = dt.day();
    let month = MONTHS[dt.month0() as usize];
    format!(
        "{}{} {} {}, {:02}:{:02}",
        day,
        ordinal_suffix(day),
        month,
        dt.year(),
        dt.hour(),
        dt.minute()
    )
}

/// Wall-clock time at `now` in the zone named by `label`, either a
/// `UTC±HH:MM` offset or an IANA name such as `Asia/Tokyo`. Anything else
/// falls back to the local zone.
pub fn calculate_datetime_at(label: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(label) = label.map(str::trim).filter(|l| !l.is_empty()) else {
        return format_datetime(&now.with_timezone(&Local));
    };

    if label.starts_with("UTC") {
        match parse_utc_offset(label) {
            Ok(offset) => return format_datetime(&now.with_timezone(&offset)),
            Err(e) => log::debug!("{e}"),
        }
    }
    match label.parse::<Tz>() {
        Ok(zone) => format_datetime(&now.with_timezone(&zone)),
        Err(_) => {
            log::debug!("unknown timezone '{label}', using local time");
            format_datetime(&now.with_timezone(&Local))
        }
    }
}

pub fn calculate_datetime(label: Option<&str>) -> String {
    calculate_datetime_at(label, Utc::now())
}
