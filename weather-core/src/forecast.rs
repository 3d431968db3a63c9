//! Nearest-timestamp selection over the provider's forecast list.

use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, Utc};

use crate::model::ForecastEntry;

/// Server-local wall-clock time of a provider timestamp.
pub fn local_time(ts: &DateTime<Utc>) -> NaiveDateTime {
    ts.with_timezone(&Local).naive_local()
}

/// Entry closest to `target`, comparing in server-local time.
pub fn nearest_entry(entries: &[ForecastEntry], target: NaiveDateTime) -> Option<&ForecastEntry> {
    nearest_entry_by(entries, target, local_time)
}

/// Entry minimizing `|to_naive(entry.timestamp) - target|`.
///
/// Only a strictly smaller distance replaces the running best, so among
/// equidistant entries the first one in list order wins. `None` for an
/// empty list.
pub fn nearest_entry_by<F>(
    entries: &[ForecastEntry],
    target: NaiveDateTime,
    to_naive: F,
) -> Option<&ForecastEntry>
where
    F: Fn(&DateTime<Utc>) -> NaiveDateTime,
{
    let best: Option<(&ForecastEntry, TimeDelta)> = None;

    entries
        .iter()
        .fold(best, |best, entry| {
            let distance = (to_naive(&entry.timestamp) - target).abs();
            match best {
                Some((_, best_distance)) if best_distance <= distance => best,
                _ => Some((entry, distance)),
            }
        })
        .map(|(entry, _)| entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::Number;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, d)
            .and_then(|date| date.and_hms_opt(h, 0, 0))
            .expect("valid datetime")
    }

    fn entry(when: NaiveDateTime, description: &str) -> ForecastEntry {
        ForecastEntry {
            timestamp: when.and_utc(),
            description: description.to_string(),
            temperature_c: Number::from(10),
            humidity_pct: 50,
            wind_speed_mps: Number::from(1),
        }
    }

    fn pick<'a>(entries: &'a [ForecastEntry], target: NaiveDateTime) -> Option<&'a str> {
        nearest_entry_by(entries, target, |ts| ts.naive_utc()).map(|e| e.description.as_str())
    }

    #[test]
    fn empty_list_has_no_nearest() {
        assert_eq!(pick(&[], at(17, 12)), None);
    }

    #[test]
    fn picks_smallest_absolute_distance() {
        let entries = [
            entry(at(17, 6), "early"),
            entry(at(17, 9), "morning"),
            entry(at(17, 12), "noon"),
            entry(at(17, 15), "afternoon"),
        ];

        assert_eq!(pick(&entries, at(17, 11)), Some("noon"));
        assert_eq!(pick(&entries, at(17, 0)), Some("early"));
        assert_eq!(pick(&entries, at(18, 0)), Some("afternoon"));
    }

    #[test]
    fn distance_is_symmetric_around_target() {
        // 2h before beats 4h after.
        let entries = [entry(at(17, 16), "after"), entry(at(17, 10), "before")];

        assert_eq!(pick(&entries, at(17, 12)), Some("before"));
    }

    #[test]
    fn tie_goes_to_first_listed() {
        let entries = [
            entry(at(17, 9), "first"),
            entry(at(17, 15), "second"),
        ];
        assert_eq!(pick(&entries, at(17, 12)), Some("first"));

        let reversed = [
            entry(at(17, 15), "second"),
            entry(at(17, 9), "first"),
        ];
        assert_eq!(pick(&reversed, at(17, 12)), Some("second"));
    }

    #[test]
    fn nearest_entry_uses_local_time() {
        let target = at(17, 12);
        let local = target
            .and_local_timezone(Local)
            .earliest()
            .expect("noon exists in every timezone")
            .with_timezone(&Utc);

        let entries = [
            ForecastEntry { timestamp: local - TimeDelta::hours(3), ..entry(at(1, 0), "before") },
            ForecastEntry { timestamp: local, ..entry(at(1, 0), "exact") },
        ];

        assert_eq!(
            nearest_entry(&entries, target).map(|e| e.description.as_str()),
            Some("exact")
        );
    }
}
