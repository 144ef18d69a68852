//! Trip records and the per-query record set.

use std::fmt;

use chrono::{NaiveDateTime, Weekday};
use serde::Serialize;

use crate::calendar;
use crate::city::City;
use crate::error::{StatsError, StatsResult};

/// A single bikeshare trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub duration_seconds: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
}

impl TripRecord {
    /// Creates a record with only the required fields set.
    pub fn new(
        start_time: NaiveDateTime,
        duration_seconds: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        user_type: impl Into<String>,
    ) -> Self {
        Self {
            start_time,
            end_time: None,
            duration_seconds,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: Some(user_type.into()),
            gender: None,
            birth_year: None,
        }
    }

    /// Sets rider demographics.
    pub fn with_demographics(mut self, gender: Option<&str>, birth_year: Option<i32>) -> Self {
        self.gender = gender.map(str::to_string);
        self.birth_year = birth_year;
        self
    }

    /// 1-based month of the trip start.
    pub fn month(&self) -> u32 {
        calendar::month_of(&self.start_time)
    }

    pub fn day_of_week(&self) -> Weekday {
        calendar::day_of_week(&self.start_time)
    }

    pub fn start_hour(&self) -> u32 {
        calendar::hour_of(&self.start_time)
    }
}

/// A field of [`TripRecord`] that the aggregators can group or count by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Month,
    DayOfWeek,
    StartHour,
    StartStation,
    EndStation,
    UserType,
    Gender,
    BirthYear,
}

impl Field {
    /// Fields only present in datasets with rider demographics.
    pub fn requires_demographics(&self) -> bool {
        matches!(self, Field::Gender | Field::BirthYear)
    }

    /// Extracts this field from `record`; `None` when the cell is missing.
    pub fn value(&self, record: &TripRecord) -> Option<FieldValue> {
        match self {
            Field::Month => Some(FieldValue::Month(record.month())),
            Field::DayOfWeek => Some(FieldValue::Day(record.day_of_week())),
            Field::StartHour => Some(FieldValue::Hour(record.start_hour())),
            Field::StartStation => Some(FieldValue::Text(record.start_station.clone())),
            Field::EndStation => Some(FieldValue::Text(record.end_station.clone())),
            Field::UserType => record.user_type.clone().map(FieldValue::Text),
            Field::Gender => record.gender.clone().map(FieldValue::Text),
            Field::BirthYear => record.birth_year.map(FieldValue::Year),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Month => "month",
            Field::DayOfWeek => "day of week",
            Field::StartHour => "start hour",
            Field::StartStation => "start station",
            Field::EndStation => "end station",
            Field::UserType => "user type",
            Field::Gender => "gender",
            Field::BirthYear => "birth year",
        };
        f.write_str(name)
    }
}

/// A single value of a [`Field`].
///
/// `Display` renders the value the way reports show it: month and day as
/// names, hours on the 12-hour clock.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Text(String),
    Year(i32),
    Month(u32),
    Day(Weekday),
    Hour(u32),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Year(y) => write!(f, "{}", y),
            FieldValue::Month(m) => match calendar::month_name(*m) {
                Some(name) => f.write_str(name),
                None => write!(f, "{}", m),
            },
            FieldValue::Day(d) => f.write_str(calendar::day_name(*d)),
            FieldValue::Hour(h) => f.write_str(&calendar::hour_12(*h)),
        }
    }
}

/// The in-memory collection of trips a query operates on.
///
/// Filtering produces a new set; the records of an existing set are never
/// modified.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    city: City,
    records: Vec<TripRecord>,
}

impl RecordSet {
    /// Builds a set for `city`. Demographic fields are dropped for cities
    /// whose dataset does not provide them.
    pub fn new(city: City, mut records: Vec<TripRecord>) -> Self {
        if !city.has_demographics() {
            for r in &mut records {
                r.gender = None;
                r.birth_year = None;
            }
        }
        Self { city, records }
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TripRecord> {
        self.records.iter()
    }

    pub fn has_field(&self, field: Field) -> bool {
        !field.requires_demographics() || self.city.has_demographics()
    }

    /// Fails with [`StatsError::MissingField`] unless the dataset provides `field`.
    pub fn require_field(&self, field: Field) -> StatsResult<()> {
        if self.has_field(field) {
            Ok(())
        } else {
            Err(StatsError::MissingField {
                field,
                city: self.city,
            })
        }
    }

    /// Returns a new set with the records for which `keep` returns `true`.
    pub fn retain_view<F>(&self, mut keep: F) -> RecordSet
    where
        F: FnMut(&TripRecord) -> bool,
    {
        RecordSet {
            city: self.city,
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trip(day: u32, hour: u32) -> TripRecord {
        let start = NaiveDate::from_ymd_opt(2017, 3, day)
            .unwrap()
            .and_hms_opt(hour, 30, 0)
            .unwrap();
        TripRecord::new(start, 600.0, "A", "B", "Subscriber")
    }

    #[test]
    fn test_derived_fields_follow_start_time() {
        // 2017-03-06 was a Monday
        let r = trip(6, 17);
        assert_eq!(r.month(), 3);
        assert_eq!(r.day_of_week(), Weekday::Mon);
        assert_eq!(r.start_hour(), 17);
    }

    #[test]
    fn test_field_values_display() {
        let r = trip(6, 0).with_demographics(Some("Female"), Some(1988));
        assert_eq!(Field::Month.value(&r).unwrap().to_string(), "March");
        assert_eq!(Field::DayOfWeek.value(&r).unwrap().to_string(), "Monday");
        assert_eq!(Field::StartHour.value(&r).unwrap().to_string(), "12 AM");
        assert_eq!(Field::Gender.value(&r).unwrap().to_string(), "Female");
        assert_eq!(Field::BirthYear.value(&r), Some(FieldValue::Year(1988)));
    }

    #[test]
    fn test_washington_drops_demographics() {
        let r = trip(6, 8).with_demographics(Some("Male"), Some(1970));
        let set = RecordSet::new(City::Washington, vec![r]);
        assert_eq!(set.records()[0].gender, None);
        assert_eq!(set.records()[0].birth_year, None);
        assert!(!set.has_field(Field::Gender));
        assert_eq!(
            set.require_field(Field::BirthYear),
            Err(StatsError::MissingField {
                field: Field::BirthYear,
                city: City::Washington
            })
        );
    }

    #[test]
    fn test_retain_view_leaves_source_untouched() {
        let set = RecordSet::new(City::Chicago, vec![trip(6, 8), trip(7, 9)]);
        let out = set.retain_view(|r| r.start_hour() == 9);
        assert_eq!(out.len(), 1);
        assert_eq!(set.len(), 2);
        assert_eq!(out.city(), City::Chicago);
    }
}
