//! Modal values of a single field and of a pair of fields.

use std::hash::Hash;

use crate::error::{StatsError, StatsResult};
use crate::record::{Field, FieldValue, RecordSet, TripRecord};
use crate::stats::tally::Tally;

/// Most frequent key produced by `key` over `records`, skipping `None`s.
///
/// Ties resolve to the key whose first occurrence comes earliest.
pub fn mode_by<'a, K, I, F>(records: I, key: F) -> StatsResult<K>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = &'a TripRecord>,
    F: Fn(&TripRecord) -> Option<K>,
{
    let tally: Tally<K> = records.into_iter().filter_map(key).collect();
    tally
        .most_common()
        .map(|(k, _)| k.clone())
        .ok_or(StatsError::EmptyInput)
}

/// Most frequent value of `field` in `subset`.
pub fn mode(subset: &RecordSet, field: Field) -> StatsResult<FieldValue> {
    subset.require_field(field)?;
    mode_by(subset.iter(), |r| field.value(r))
}

/// Most frequent combination of `(field_a, field_b)` in `subset`.
///
/// Records missing either value do not form a group.
pub fn most_frequent_pair(
    subset: &RecordSet,
    field_a: Field,
    field_b: Field,
) -> StatsResult<(FieldValue, FieldValue)> {
    subset.require_field(field_a)?;
    subset.require_field(field_b)?;
    mode_by(subset.iter(), |r| Some((field_a.value(r)?, field_b.value(r)?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::City;
    use chrono::{NaiveDate, Weekday};

    fn trip(day: u32, hour: u32, from: &str, to: &str) -> TripRecord {
        let start = NaiveDate::from_ymd_opt(2017, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        TripRecord::new(start, 60.0, from, to, "Subscriber")
    }

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn test_mode_of_empty_subset_fails() {
        let set = RecordSet::new(City::Chicago, vec![]);
        assert_eq!(mode(&set, Field::StartStation), Err(StatsError::EmptyInput));
        assert_eq!(
            most_frequent_pair(&set, Field::StartStation, Field::EndStation),
            Err(StatsError::EmptyInput)
        );
    }

    #[test]
    fn test_mode_picks_highest_count() {
        let set = RecordSet::new(
            City::Chicago,
            vec![
                trip(1, 8, "A", "X"),
                trip(2, 8, "B", "X"),
                trip(3, 17, "B", "Y"),
                trip(4, 17, "B", "Y"),
                trip(5, 17, "A", "Y"),
            ],
        );
        assert_eq!(mode(&set, Field::StartStation), Ok(text("B")));
        assert_eq!(mode(&set, Field::EndStation), Ok(text("Y")));
        assert_eq!(mode(&set, Field::StartHour), Ok(FieldValue::Hour(17)));
        assert_eq!(mode(&set, Field::Month), Ok(FieldValue::Month(5)));
    }

    #[test]
    fn test_mode_count_dominates_every_other_value() {
        let set = RecordSet::new(
            City::Chicago,
            (1..=20)
                .map(|i| trip(i, i % 5, &format!("S{}", i % 3), "E"))
                .collect(),
        );
        let winner = mode(&set, Field::StartStation).unwrap();
        let tally: Tally<_> = set.iter().filter_map(|r| Field::StartStation.value(r)).collect();
        for (value, count) in tally.clone().into_sorted() {
            assert!(tally.count(&winner) >= count, "{} beats the mode", value);
        }
    }

    #[test]
    fn test_mode_tie_uses_first_occurrence() {
        // 2017-05-02 Tue, 2017-05-01 Mon, each twice
        let set = RecordSet::new(
            City::Chicago,
            vec![
                trip(2, 8, "Z", "X"),
                trip(1, 8, "A", "X"),
                trip(1, 8, "A", "X"),
                trip(2, 8, "Z", "X"),
            ],
        );
        assert_eq!(mode(&set, Field::DayOfWeek), Ok(FieldValue::Day(Weekday::Tue)));
        assert_eq!(mode(&set, Field::StartStation), Ok(text("Z")));
    }

    #[test]
    fn test_most_frequent_pair() {
        let set = RecordSet::new(
            City::Chicago,
            vec![
                trip(1, 8, "A", "B"),
                trip(1, 8, "A", "C"),
                trip(1, 8, "D", "C"),
                trip(1, 8, "A", "C"),
                trip(1, 8, "A", "B"),
                trip(1, 8, "A", "C"),
            ],
        );
        assert_eq!(
            most_frequent_pair(&set, Field::StartStation, Field::EndStation),
            Ok((text("A"), text("C")))
        );
    }

    #[test]
    fn test_most_frequent_pair_tie_uses_first_occurrence() {
        let set = RecordSet::new(
            City::Chicago,
            vec![
                trip(1, 8, "M", "N"),
                trip(1, 8, "A", "B"),
                trip(1, 8, "A", "B"),
                trip(1, 8, "M", "N"),
            ],
        );
        assert_eq!(
            most_frequent_pair(&set, Field::StartStation, Field::EndStation),
            Ok((text("M"), text("N")))
        );
    }

    #[test]
    fn test_mode_on_missing_field() {
        let set = RecordSet::new(City::Washington, vec![trip(1, 8, "A", "B")]);
        assert_eq!(
            mode(&set, Field::Gender),
            Err(StatsError::MissingField {
                field: Field::Gender,
                city: City::Washington
            })
        );
    }

    #[test]
    fn test_mode_skips_missing_values() {
        let set = RecordSet::new(
            City::Chicago,
            vec![
                trip(1, 8, "A", "B"),
                trip(1, 8, "A", "B").with_demographics(Some("Female"), None),
                trip(1, 8, "A", "B"),
            ],
        );
        assert_eq!(mode(&set, Field::Gender), Ok(text("Female")));
        assert_eq!(mode(&set, Field::BirthYear), Err(StatsError::EmptyInput));
    }
}
