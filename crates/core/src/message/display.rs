use chrono::{DateTime, TimeZone, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Formats the distance between `created_at_ms` and `now` in words,
/// e.g. "5 minutes ago" or "in about 2 hours".
pub fn relative_age(created_at_ms: i64, now: DateTime<Utc>) -> String {
    let created = Utc
        .timestamp_millis_opt(created_at_ms)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    let delta = now.signed_duration_since(created).num_seconds();
    let distance = distance_in_words(delta.abs());

    if delta < 0 {
        format!("in {distance}")
    } else {
        format!("{distance} ago")
    }
}

fn distance_in_words(seconds: i64) -> String {
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {unit}")
        } else {
            format!("{n} {unit}s")
        }
    };

    match seconds {
        s if s < 30 => "less than a minute".to_string(),
        s if s < 90 => "1 minute".to_string(),
        s if s < 45 * MINUTE => plural((s + MINUTE / 2) / MINUTE, "minute"),
        s if s < 90 * MINUTE => "about 1 hour".to_string(),
        s if s < DAY => format!("about {}", plural((s + HOUR / 2) / HOUR, "hour")),
        s if s < 42 * HOUR => "1 day".to_string(),
        s if s < MONTH => plural((s + DAY / 2) / DAY, "day"),
        s if s < 45 * DAY => "about 1 month".to_string(),
        s if s < 60 * DAY => "about 2 months".to_string(),
        s if s < YEAR => plural(s / MONTH, "month"),
        s => {
            let years = s / YEAR;
            let months = (s % YEAR) / MONTH;
            match months {
                m if m < 3 => format!("about {}", plural(years, "year")),
                m if m < 9 => format!("over {}", plural(years, "year")),
                _ => format!("almost {}", plural(years + 1, "year")),
            }
        }
    }
}

/// Shortens an opaque user id for display: the first 8 characters and "...".
pub fn short_user_id(user_id: &str) -> String {
    let prefix: String = user_id.chars().take(8).collect();
    format!("{prefix}...")
}
