use lazy_static::lazy_static;
use regex::Regex;
use time::{macros::format_description, Date, OffsetDateTime, UtcOffset};

use crate::error::ValidationError;

/// Calendar-day partition key (`YYYY-MM-DD`) of an instant, taken in UTC.
pub fn date_key(at: OffsetDateTime) -> String {
    let d = at.to_offset(UtcOffset::UTC).date();
    format!("{:04}-{:02}-{:02}", d.year(), u8::from(d.month()), d.day())
}

pub fn today_key() -> String {
    date_key(OffsetDateTime::now_utc())
}

pub fn unix_millis(at: OffsetDateTime) -> i64 {
    (at.unix_timestamp_nanos() / 1_000_000) as i64
}

pub(crate) fn is_valid_date_key(s: &str) -> bool {
    lazy_static! {
        static ref DATE_RE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    }
    DATE_RE.is_match(s)
}

/// Parse a user-supplied `YYYY-MM-DD` into a calendar date.
pub fn parse_date_key(s: &str) -> Result<Date, ValidationError> {
    let s = s.trim();
    if !is_valid_date_key(s) {
        return Err(ValidationError::InvalidDate(s.to_string()));
    }
    Date::parse(s, format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

/// "Today", "Yesterday", or a short month-day label such as "Mar 7".
pub fn display_date(key: &str, today: Date) -> String {
    let Ok(date) = parse_date_key(key) else {
        return key.to_string();
    };
    if date == today {
        "Today".to_string()
    } else if today.previous_day() == Some(date) {
        "Yesterday".to_string()
    } else {
        let month = date.month().to_string();
        format!("{} {}", &month[..3], date.day())
    }
}

/// `HH:MM` (UTC) of a unix-millisecond timestamp.
pub fn format_time(timestamp_ms: i64) -> String {
    let nanos = i128::from(timestamp_ms) * 1_000_000;
    match OffsetDateTime::from_unix_timestamp_nanos(nanos) {
        Ok(at) => format!("{:02}:{:02}", at.hour(), at.minute()),
        Err(_) => "--:--".to_string(),
    }
}
