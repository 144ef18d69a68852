//! Count-by-value breakdowns for categorical fields.

use serde::Serialize;

use crate::error::{StatsError, StatsResult};
use crate::record::{Field, RecordSet};
use crate::stats::tally::Tally;

/// One row of a category breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Counts each distinct value of `field`, ordered by descending count.
///
/// Values with equal counts keep their first-occurrence order. Missing cells
/// are not counted.
pub fn counts_by_category(subset: &RecordSet, field: Field) -> StatsResult<Vec<CategoryCount>> {
    subset.require_field(field)?;
    if subset.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let tally: Tally<_> = subset.iter().filter_map(|r| field.value(r)).collect();
    Ok(tally
        .into_sorted()
        .into_iter()
        .map(|(value, count)| CategoryCount {
            value: value.to_string(),
            count,
        })
        .collect())
}
