use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// How far ahead the provider's 3-hour forecast reaches, in calendar days.
pub const FORECAST_HORIZON_DAYS: u64 = 5;

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"];
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid isoformat string: '{input}'")]
pub struct DateParseError {
    pub input: String,
}

/// Parse an ISO-8601 date or date-time.
///
/// A bare date means midnight. When an offset is present the wall-clock
/// value is kept as-is and the offset dropped.
pub fn parse_requested_date(input: &str) -> Result<NaiveDateTime, DateParseError> {
    let err = || DateParseError {
        input: input.to_string(),
    };

    let trimmed = input.trim();
    if trimmed.len() == 10 {
        return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(err);
    }

    let mut normalized = trimmed.to_string();
    if normalized.get(10..11) == Some(" ") {
        normalized.replace_range(10..11, "T");
    }
    if let Some(stripped) = normalized.strip_suffix('Z') {
        normalized = format!("{stripped}+00:00");
    }

    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&normalized, fmt).ok())
        .map(|dt| dt.naive_local())
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
        })
        .ok_or_else(err)
}

/// Which fetcher a request should go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRequest {
    /// No date given.
    Current,
    /// Inside `[today, today + FORECAST_HORIZON_DAYS]`.
    Forecast(NaiveDateTime),
    /// Outside the window; carries the requested calendar date.
    OutOfRange(NaiveDate),
}

/// Compare the calendar date only, never the time of day.
pub fn classify_date(today: NaiveDate, requested: Option<NaiveDateTime>) -> DateRequest {
    let Some(target) = requested else {
        return DateRequest::Current;
    };

    let last = today
        .checked_add_days(Days::new(FORECAST_HORIZON_DAYS))
        .unwrap_or(NaiveDate::MAX);

    let day = target.date();
    if today <= day && day <= last {
        DateRequest::Forecast(target)
    } else {
        DateRequest::OutOfRange(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, s))
            .expect("valid datetime")
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn parses_supported_shapes() {
        let cases = [
            ("2026-10-17", ymd_hms(2026, 10, 17, 0, 0, 0)),
            ("2026-10-17T15:30", ymd_hms(2026, 10, 17, 15, 30, 0)),
            ("2026-10-17T15:30:45", ymd_hms(2026, 10, 17, 15, 30, 45)),
            ("2026-10-17 15:30:45", ymd_hms(2026, 10, 17, 15, 30, 45)),
            ("2026-10-17T15:30:45.250", ymd_hms(2026, 10, 17, 15, 30, 45) + chrono::Duration::milliseconds(250)),
            ("2026-10-17T15:30:45+02:00", ymd_hms(2026, 10, 17, 15, 30, 45)),
            ("2026-10-17T15:30:45Z", ymd_hms(2026, 10, 17, 15, 30, 45)),
        ];

        for (input, expected) in cases {
            assert_eq!(parse_requested_date(input), Ok(expected), "input: {input}");
        }
    }

    #[test]
    fn offset_keeps_wall_clock_date() {
        // Late evening in a negative offset must stay on the same calendar day.
        let parsed = parse_requested_date("2026-10-17T23:00:00-05:00").expect("parse");
        assert_eq!(parsed.date(), day(2026, 10, 17));
    }

    #[test]
    fn rejects_garbage() {
        for input in ["not-a-date", "", "2026-13-01", "17/10/2026", "2026-10-17T25:00"] {
            let err = parse_requested_date(input).unwrap_err();
            assert_eq!(err.to_string(), format!("Invalid isoformat string: '{input}'"));
        }
    }

    #[test]
    fn no_date_means_current() {
        assert_eq!(classify_date(day(2026, 10, 16), None), DateRequest::Current);
    }

    #[test]
    fn window_is_inclusive_on_both_ends() {
        let today = day(2026, 10, 16);

        let first = ymd_hms(2026, 10, 16, 0, 0, 0);
        let last = ymd_hms(2026, 10, 21, 23, 59, 59);

        assert_eq!(classify_date(today, Some(first)), DateRequest::Forecast(first));
        assert_eq!(classify_date(today, Some(last)), DateRequest::Forecast(last));
    }

    #[test]
    fn earlier_time_today_is_still_in_range() {
        let today = day(2026, 10, 16);
        let this_morning = ymd_hms(2026, 10, 16, 6, 0, 0);

        assert_eq!(classify_date(today, Some(this_morning)), DateRequest::Forecast(this_morning));
    }

    #[test]
    fn outside_window_is_out_of_range() {
        let today = day(2026, 10, 16);

        assert_eq!(
            classify_date(today, Some(ymd_hms(2026, 10, 22, 0, 0, 0))),
            DateRequest::OutOfRange(day(2026, 10, 22))
        );
        assert_eq!(
            classify_date(today, Some(ymd_hms(2026, 10, 15, 12, 0, 0))),
            DateRequest::OutOfRange(day(2026, 10, 15))
        );
    }
}
