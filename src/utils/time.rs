use chrono::{DateTime, Duration, Local, NaiveDateTime, Utc};

/// Backend timestamps are UTC; the dashboard always shows Japan time.
pub const DISPLAY_OFFSET_HOURS: i64 = 9;

fn to_display_time(timestamp: DateTime<Utc>) -> NaiveDateTime {
    (timestamp + Duration::hours(DISPLAY_OFFSET_HOURS)).naive_utc()
}

/// `2024/5/1 21:00:00 (JST)`
pub fn format_display_time(timestamp: DateTime<Utc>) -> String {
    format!(
        "{} (JST)",
        to_display_time(timestamp).format("%Y/%-m/%-d %-H:%M:%S")
    )
}

pub fn current_human_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn shifts_utc_by_nine_hours() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 5).unwrap();
        assert_eq!(format_display_time(ts), "2024/5/1 21:00:05 (JST)");
    }

    #[test]
    fn crosses_midnight_into_next_day() {
        let ts = Utc.with_ymd_and_hms(2024, 12, 31, 20, 30, 0).unwrap();
        assert_eq!(format_display_time(ts), "2025/1/1 5:30:00 (JST)");
    }
}
