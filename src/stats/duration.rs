//! Total and mean trip duration.

use serde::Serialize;

use crate::error::{StatsError, StatsResult};
use crate::record::RecordSet;

/// Total travel time split into hours and a minutes figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TotalDuration {
    pub hours: i64,
    pub minutes: i64,
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sum of `duration_seconds`, rounded half-to-even to whole seconds.
pub fn total_seconds(subset: &RecordSet) -> StatsResult<i64> {
    if subset.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let sum: f64 = subset.iter().map(|r| r.duration_seconds).sum();
    Ok(sum.round_ties_even() as i64)
}

/// Total duration as `(hours, minutes)`.
///
/// `hours` is whole hours of the rounded total. `minutes` is the rounded total
/// *seconds* modulo 60, not the minutes left over after the hours; reports
/// built on this crate have always shown that figure.
pub fn total_duration(subset: &RecordSet) -> StatsResult<TotalDuration> {
    let total = total_seconds(subset)?;
    Ok(TotalDuration {
        hours: total.div_euclid(3600),
        minutes: total.rem_euclid(60),
    })
}

/// Mean trip duration in whole minutes, rounded half-to-even.
pub fn mean_duration(subset: &RecordSet) -> StatsResult<i64> {
    if subset.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let durations: Vec<f64> = subset.iter().map(|r| r.duration_seconds).collect();
    Ok((mean(&durations) / 60.0).round_ties_even() as i64)
}
