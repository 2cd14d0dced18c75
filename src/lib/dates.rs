use chrono::{DateTime, Locale, Utc};

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Whole days between two instants, rounded, regardless of order.
pub fn days_between(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    ((b - a).num_milliseconds().abs() as f64 / MILLIS_PER_DAY).round() as i64
}

/// Label shown next to a movement: relative for the last week, a calendar
/// date in the account's locale otherwise.
pub fn format_movement_date(date: DateTime<Utc>, locale: &str, now: DateTime<Utc>) -> String {
    match days_between(date, now) {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        days @ 2..=7 => format!("{days} days ago"),
        _ => date.format_localized("%x", parse_locale(locale)).to_string(),
    }
}

/// Header label, e.g. "05/03/2020, 09:07".
pub fn format_current_date(now: DateTime<Utc>) -> String {
    now.format("%d/%m/%Y, %H:%M").to_string()
}

/// Maps a BCP-47 tag like "pt-PT" onto a chrono locale, falling back to en-US.
pub fn parse_locale(tag: &str) -> Locale {
    let name = tag.trim().replace('-', "_");
    Locale::try_from(name.as_str()).unwrap_or_else(|_| {
        tracing::debug!(tag, "unknown locale, using en-US");
        Locale::en_US
    })
}
