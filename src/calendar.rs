//! Calendar attributes derived from a trip's start timestamp.
//!
//! Month and day-of-week are never stored on a record; they are always
//! recomputed from `start_time` through the functions here.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

/// Month display names, indexed from January (`MONTH_NAMES[0]`).
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Day display names, Monday first.
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Days of the week in the same order as [`DAY_NAMES`].
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Returns the 1-based month of `ts`.
pub fn month_of(ts: &NaiveDateTime) -> u32 {
    ts.month()
}

/// Returns the day of the week of `ts`.
pub fn day_of_week(ts: &NaiveDateTime) -> Weekday {
    ts.weekday()
}

/// Returns the hour of day (0-23) of `ts`.
pub fn hour_of(ts: &NaiveDateTime) -> u32 {
    ts.hour()
}

/// Derives `(month, day_of_week)` from a timestamp.
pub fn derive(ts: &NaiveDateTime) -> (u32, Weekday) {
    (month_of(ts), day_of_week(ts))
}

/// Resolves a month name (case-insensitive, full name only) to its 1-based index.
pub fn month_index(name: &str) -> Option<u32> {
    let name = name.trim();
    MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|i| i as u32 + 1)
}

/// Resolves a day name (case-insensitive, full name only) to a [`Weekday`].
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    let name = name.trim();
    DAY_NAMES
        .iter()
        .position(|d| d.eq_ignore_ascii_case(name))
        .map(|i| WEEKDAYS[i])
}

/// Title-case display name for a 1-based month, e.g. `6` -> `"June"`.
pub fn month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize).copied())
}

/// Full display name for a weekday, e.g. `Weekday::Mon` -> `"Monday"`.
pub fn day_name(day: Weekday) -> &'static str {
    DAY_NAMES[day.num_days_from_monday() as usize]
}

/// Formats a 24-hour clock hour as `"<h> AM"` / `"<h> PM"`.
///
/// | Hour  | Result        |
/// |-------|---------------|
/// | 0     | 12 AM         |
/// | 1-11  | `<h>` AM      |
/// | 12    | 12 PM         |
/// | 13-23 | `<h - 12>` PM |
pub fn hour_12(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        1..=11 => format!("{} AM", hour),
        12 => "12 PM".to_string(),
        h => format!("{} PM", h - 12),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_derive_month_and_day() {
        // 2017-06-23 was a Friday
        assert_eq!(derive(&ts(2017, 6, 23, 15)), (6, Weekday::Fri));
        assert_eq!(derive(&ts(2017, 1, 1, 0)), (1, Weekday::Sun));
    }

    #[test]
    fn test_month_index_is_case_insensitive() {
        assert_eq!(month_index("january"), Some(1));
        assert_eq!(month_index("JUNE"), Some(6));
        assert_eq!(month_index("December"), Some(12));
        assert_eq!(month_index(" sEpTeMbEr "), Some(9));
        assert_eq!(month_index("jan"), None);
        assert_eq!(month_index("all"), None);
    }

    #[test]
    fn test_weekday_from_name() {
        assert_eq!(weekday_from_name("monday"), Some(Weekday::Mon));
        assert_eq!(weekday_from_name("SuNdAy"), Some(Weekday::Sun));
        assert_eq!(weekday_from_name("mon"), None);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
        assert_eq!(day_name(Weekday::Wed), "Wednesday");
    }

    #[test]
    fn test_display_names_resolve_back() {
        for month in 1..=12 {
            let name = month_name(month).unwrap();
            assert_eq!(month_index(name), Some(month));
            assert_eq!(month_index(&name.to_uppercase()), Some(month));
            assert_eq!(month_index(&name.to_lowercase()), Some(month));
        }
        for day in WEEKDAYS {
            let name = day_name(day);
            assert_eq!(weekday_from_name(name), Some(day));
            assert_eq!(weekday_from_name(&name.to_lowercase()), Some(day));
        }
    }

    #[test]
    fn test_hour_12_boundaries() {
        assert_eq!(hour_12(0), "12 AM");
        assert_eq!(hour_12(1), "1 AM");
        assert_eq!(hour_12(11), "11 AM");
        assert_eq!(hour_12(12), "12 PM");
        assert_eq!(hour_12(13), "1 PM");
        assert_eq!(hour_12(23), "11 PM");
    }
}
