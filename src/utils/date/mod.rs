// Date utility functions

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime};

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

pub fn start_of_day(date: NaiveDate) -> Option<DateTime<Local>> {
    date.and_hms_opt(0, 0, 0)?.and_local_timezone(Local).single()
}

/// Format a time of day according to the time format setting.
pub fn format_time(time: NaiveTime, time_format: &str) -> String {
    if time_format == "12h" {
        time.format("%I:%M %p").to_string()
    } else {
        time.format("%H:%M").to_string()
    }
}

/// Short day-month label, e.g. "Jun 3".
pub fn format_short_date(date: NaiveDate) -> String {
    format!("{} {}", date.format("%b"), date.day())
}

/// Label for a 7-day window, e.g. "Jun 3 – Jun 9, 2024".
pub fn format_week_range(start: NaiveDate) -> String {
    let end = start + Duration::days(6);
    if start.year() == end.year() {
        format!(
            "{} – {}, {}",
            format_short_date(start),
            format_short_date(end),
            start.year()
        )
    } else {
        format!(
            "{}, {} – {}, {}",
            format_short_date(start),
            start.year(),
            format_short_date(end),
            end.year()
        )
    }
}
