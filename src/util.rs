use chrono::{DateTime, Datelike, TimeZone, Timelike};

/// Wall-clock key `HHMMSS` used to rank commits by time of day, ignoring the date.
pub fn time_of_day_key<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> u32 {
    timestamp.hour() * 10000 + timestamp.minute() * 100 + timestamp.second()
}

/// Day of the year (1-366) in the timestamp's own zone.
pub fn day_of_year<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> u32 {
    timestamp.ordinal()
}

pub fn format_timestamp<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.format("%Y-%m-%d %H:%M:%S %:z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn time_of_day_ignores_the_date() {
        let tz = FixedOffset::east_opt(0).unwrap();
        let a = tz.with_ymd_and_hms(2023, 1, 1, 9, 5, 7).unwrap();
        let b = tz.with_ymd_and_hms(2023, 12, 31, 9, 5, 7).unwrap();
        assert_eq!(time_of_day_key(&a), 90507);
        assert_eq!(time_of_day_key(&a), time_of_day_key(&b));
    }

    #[test]
    fn day_of_year_uses_author_offset() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let ts = tz.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap();
        assert_eq!(day_of_year(&ts), 366);
        assert_eq!(format_timestamp(&ts), "2024-12-31 23:00:00 -05:00");
    }
}
