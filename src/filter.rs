//! Month and day-of-week filtering of a [`RecordSet`].

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Serialize, Serializer};

use crate::calendar;
use crate::error::SelectorError;
use crate::record::RecordSet;

/// Month constraint of a query: `"all"` or one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthSelector {
    #[default]
    All,
    /// 1-based month index.
    Only(u32),
}

/// Day-of-week constraint of a query: `"all"` or one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DaySelector {
    #[default]
    All,
    Only(Weekday),
}

impl FromStr for MonthSelector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(MonthSelector::All);
        }
        calendar::month_index(s)
            .map(MonthSelector::Only)
            .ok_or_else(|| SelectorError::UnknownMonth(s.to_string()))
    }
}

impl FromStr for DaySelector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(DaySelector::All);
        }
        calendar::weekday_from_name(s)
            .map(DaySelector::Only)
            .ok_or_else(|| SelectorError::UnknownDay(s.to_string()))
    }
}

impl fmt::Display for MonthSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthSelector::All => f.write_str("all"),
            MonthSelector::Only(m) => match calendar::month_name(*m) {
                Some(name) => f.write_str(name),
                None => write!(f, "{}", m),
            },
        }
    }
}

impl fmt::Display for DaySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaySelector::All => f.write_str("all"),
            DaySelector::Only(d) => f.write_str(calendar::day_name(*d)),
        }
    }
}

impl Serialize for MonthSelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for DaySelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Keeps the records whose start month matches `month`.
pub fn filter_month(records: &RecordSet, month: MonthSelector) -> RecordSet {
    match month {
        MonthSelector::All => records.clone(),
        MonthSelector::Only(m) => records.retain_view(|r| r.month() == m),
    }
}

/// Keeps the records whose start day matches `day`.
pub fn filter_day(records: &RecordSet, day: DaySelector) -> RecordSet {
    match day {
        DaySelector::All => records.clone(),
        DaySelector::Only(d) => records.retain_view(|r| r.day_of_week() == d),
    }
}

/// Applies both constraints (month, then day). The result may be empty.
pub fn filter(records: &RecordSet, month: MonthSelector, day: DaySelector) -> RecordSet {
    filter_day(&filter_month(records, month), day)
}
