// Date utility functions
// Week arithmetic and HH:MM helpers for the scheduling grid

use chrono::{Datelike, Duration, NaiveDate};

/// Day names indexed by ISO day (0 = Monday).
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Canonical start of the week containing `date` (its Monday).
pub fn week_start_for(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(offset)
}

/// Last day of the week that starts on `week_start`.
pub fn week_end(week_start: NaiveDate) -> NaiveDate {
    week_start + Duration::days(6)
}

/// Date shown in the column for `day_of_week`.
pub fn column_date(week_start: NaiveDate, day_of_week: u8) -> NaiveDate {
    week_start + Duration::days(day_of_week as i64)
}

pub fn is_current_week(week_start: NaiveDate, today: NaiveDate) -> bool {
    week_start_for(today) == week_start
}

/// Human readable label for a date range.
///
/// * same month: `19 – 25 Jan 2026`
/// * same year: `26 Jan – 1 Feb 2026`
/// * otherwise: `29 Dec 2025 – 4 Jan 2026`
pub fn format_week_label(start: NaiveDate, end: NaiveDate) -> String {
    if start.year() != end.year() {
        format!(
            "{} {} – {} {}",
            start.day(),
            start.format("%b %Y"),
            end.day(),
            end.format("%b %Y")
        )
    } else if start.month() != end.month() {
        format!(
            "{} {} – {} {}",
            start.day(),
            start.format("%b"),
            end.day(),
            end.format("%b %Y")
        )
    } else {
        format!("{} – {} {}", start.day(), end.day(), end.format("%b %Y"))
    }
}

/// Parse a zero-padded `HH:MM` string into minutes after midnight.
pub fn parse_hhmm(value: &str) -> Option<u32> {
    let (hours, minutes) = value.split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 24 || minutes > 59 || (hours == 24 && minutes != 0) {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Format minutes after midnight as `HH:MM`.
pub fn format_minutes(total: u32) -> String {
    format!("{:02}:{:02}", total / 60, total % 60)
}
