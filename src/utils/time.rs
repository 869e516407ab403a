use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Format used for every time of day in the configuration file.
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M";

/// Every time of day is placed on this date before any arithmetic, so only the time of day
/// takes part in the calculation.
pub const REFERENCE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2000, 1, 1) {
    Some(date) => date,
    None => panic!("reference date is valid"),
};

pub fn anchor(time: NaiveTime) -> NaiveDateTime {
    REFERENCE_DATE.and_time(time)
}

/// Parses `HH:MM`.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_OF_DAY_FORMAT)
        .with_context(|| format!("Expected a time of day formatted as HH:MM, got {value:?}"))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::{anchor, parse_time_of_day, REFERENCE_DATE};

    #[test]
    fn parses_hours_and_minutes() {
        assert_eq!(
            parse_time_of_day("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time_of_day(" 18:05 ").unwrap(),
            NaiveTime::from_hms_opt(18, 5, 0).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_times() {
        assert!(parse_time_of_day("").is_err());
        assert!(parse_time_of_day("9.30").is_err());
        assert!(parse_time_of_day("25:00").is_err());
        assert!(parse_time_of_day("noon").is_err());
    }

    #[test]
    fn anchored_times_share_a_date() {
        let early = anchor(NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        let late = anchor(NaiveTime::from_hms_opt(23, 59, 59).unwrap());
        assert_eq!(early.date(), REFERENCE_DATE);
        assert_eq!(late.date(), REFERENCE_DATE);
        assert_eq!((late - early).num_seconds(), 24 * 3600 - 1);
    }
}
