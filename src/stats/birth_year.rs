//! Earliest, latest and most common rider birth year.

use serde::Serialize;

use crate::error::{StatsError, StatsResult};
use crate::record::{Field, RecordSet};
use crate::stats::frequency::mode_by;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: i32,
}

/// Min, max and mode of the non-missing birth years in `subset`.
pub fn birth_year_stats(subset: &RecordSet) -> StatsResult<BirthYearStats> {
    subset.require_field(Field::BirthYear)?;

    let mut years = subset.iter().filter_map(|r| r.birth_year);
    let first = years.next().ok_or(StatsError::EmptyInput)?;
    let (earliest, latest) = years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
    let most_common = mode_by(subset.iter(), |r| r.birth_year)?;

    Ok(BirthYearStats {
        earliest,
        latest,
        most_common,
    })
}
