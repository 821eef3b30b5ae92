use chrono::{DateTime, Utc};

/// Formats a date as `YYYY-MM-DD`.
pub fn short_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Formats a date as `YYYY-MM-DD HH:MM UTC`.
pub fn long_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_short_date() {
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 14, 30, 59).unwrap();
        assert_eq!(short_date(&date), "2024-06-01");
    }

    #[test]
    fn test_long_date() {
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 14, 30, 59).unwrap();
        assert_eq!(long_date(&date), "2024-06-01 14:30 UTC");
    }
}
