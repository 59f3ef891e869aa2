use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, TimeZone};

/// This is the standard way of converting a date to a string in oshikko.
pub fn date_to_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Returns the first moment of `date` in `tz`. When midnight doesn't exist because of a DST
/// transition the moment midnight UTC maps to is used instead.
pub fn day_start<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

/// Returns start of the next day.
pub fn next_day_start<Tz: TimeZone>(date: &DateTime<Tz>) -> DateTime<Tz> {
    let day = date.date_naive();
    day_start(&date.timezone(), day.succ_opt().unwrap_or(day))
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(date.weekday().num_days_from_monday() as u64)
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month after the one containing `date`.
pub fn next_month_start(date: NaiveDate) -> NaiveDate {
    let start = month_start(date);
    start.checked_add_months(Months::new(1)).unwrap_or(start)
}

/// Human friendly rendering of an interval, `2h 5m` or `45m`.
pub fn format_minutes(minutes: i64) -> String {
    let hours = minutes / 60;
    let minutes = minutes % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate, TimeZone, Timelike, Utc};

    use super::{format_minutes, month_start, next_day_start, next_month_start, week_start};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_start_is_monday() {
        // 2024-01-03 is a Wednesday.
        assert_eq!(week_start(date(2024, 1, 3)), date(2024, 1, 1));
        assert_eq!(week_start(date(2024, 1, 1)), date(2024, 1, 1));
        assert_eq!(week_start(date(2024, 1, 7)), date(2024, 1, 1));
        assert_eq!(week_start(date(2024, 3, 3)), date(2024, 2, 26));
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_start(date(2024, 2, 29)), date(2024, 2, 1));
        assert_eq!(next_month_start(date(2024, 2, 29)), date(2024, 3, 1));
        assert_eq!(next_month_start(date(2023, 12, 31)), date(2024, 1, 1));
    }

    #[test]
    fn test_next_day_start_keeps_timezone() {
        let offset = FixedOffset::east_opt(3600 * 9).unwrap();
        let moment = offset.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap();
        let next = next_day_start(&moment);
        assert_eq!(next.date_naive(), date(2024, 1, 2));
        assert_eq!(next.hour(), 0);
        assert_eq!(next.to_utc(), Utc.with_ymd_and_hms(2024, 1, 1, 15, 0, 0).unwrap());
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0), "0m");
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(60), "1h 0m");
        assert_eq!(format_minutes(150), "2h 30m");
    }
}
