//! Lenient time and date parsing for hand-entered spreadsheet values.
//!
//! Activity logs are typed by hand, so the time column mixes `1:00 PM`,
//! `13:00`, `01:00:00pm` and friends. Parsing is forgiving about format but
//! strict about ambiguity: a 24-hour value with both seconds and a meridiem
//! (`13:00:00 PM`) is rejected rather than guessed at.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{1,2}):(\d{2})(?::(\d{2}))?\s*(?:([AaPp])\.?\s*[Mm]\.?)?\s*$")
        .expect("time regex is valid")
});

/// Date formats accepted for date cells stored as text, tried in order.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
];

/// Datetime formats accepted for date cells that carry a time suffix.
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M:%S"];

/// Parse a time-of-day string of unknown format.
///
/// Rules, matching the observed behavior of hand-entered logs:
/// - hour 1-12 with a meridiem converts the usual way (`12 AM` -> 00:00)
/// - hour 13-23 without a meridiem is 24-hour time
/// - hour 13-23 with a meridiem but no seconds is accepted as 24-hour time
///   (the meridiem is noise: `13:00 PM` -> 13:00)
/// - hour 13-23 with a meridiem and seconds is ambiguous -> `None`
/// - no meridiem defaults to AM, so `1:00` -> 01:00
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let caps = TIME_RE.captures(text)?;

    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    let (second, has_seconds) = match caps.get(3) {
        Some(m) => (m.as_str().parse().ok()?, true),
        None => (0, false),
    };
    let meridiem = caps
        .get(4)
        .map(|m| m.as_str().to_ascii_lowercase().chars().next().unwrap_or('a'));

    let hour = match (meridiem, hour) {
        (Some(_), h) if h > 12 => {
            if has_seconds {
                return None;
            }
            h
        }
        (Some(m), 12) => {
            if m == 'a' {
                0
            } else {
                12
            }
        }
        (Some(m), h) => {
            if m == 'p' {
                h + 12
            } else {
                h
            }
        }
        (None, h) => h,
    };

    NaiveTime::from_hms_opt(hour, minute, second)
}

/// Parse a date string of unknown format. Tries plain dates first, then
/// datetime strings (spreadsheet date cells often stringify with a midnight
/// suffix), taking the date part.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }
    None
}
