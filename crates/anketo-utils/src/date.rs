use crate::date::error::DateError;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

pub mod error;

/// Turns a pair of calendar dates into the inclusive window a survey accepts
/// responses in: `start 00:00:00` through `end 23:59:59`.
pub fn day_window(start: NaiveDate, end: NaiveDate) -> Result<(NaiveDateTime, NaiveDateTime), DateError> {
    let opens = start.and_time(NaiveTime::default());
    let closes = end
        .succ_opt()
        .ok_or(DateError::Overflow)?
        .and_time(NaiveTime::default())
        .checked_sub_signed(Duration::try_seconds(1).ok_or(DateError::Overflow)?)
        .ok_or(DateError::Overflow)?;
    Ok((opens, closes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_day_window(start: &str, end: &str, opens: &str, closes: &str) {
        let start = start.parse::<NaiveDate>().unwrap();
        let end = end.parse::<NaiveDate>().unwrap();
        let expected_opens = opens.parse::<NaiveDateTime>().unwrap();
        let expected_closes = closes.parse::<NaiveDateTime>().unwrap();
        assert_eq!(day_window(start, end).unwrap(), (expected_opens, expected_closes));
    }

    #[test]
    fn test_day_window() {
        check_day_window("2024-03-01", "2024-03-31", "2024-03-01T00:00:00", "2024-03-31T23:59:59");
        check_day_window("2024-02-28", "2024-02-29", "2024-02-28T00:00:00", "2024-02-29T23:59:59");
        check_day_window("2024-05-05", "2024-05-05", "2024-05-05T00:00:00", "2024-05-05T23:59:59");
    }

    #[test]
    fn test_day_window_overflow() {
        assert!(matches!(
            day_window(NaiveDate::MIN, NaiveDate::MAX),
            Err(DateError::Overflow)
        ));
    }
}
