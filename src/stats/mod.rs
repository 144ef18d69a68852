//! Aggregators over a filtered [`crate::record::RecordSet`].
//!
//! Every aggregator is read-only over its input and fails with
//! [`crate::error::StatsError::EmptyInput`] when there is nothing to aggregate.

pub mod birth_year;
pub mod categorical;
pub mod duration;
pub mod frequency;
pub mod tally;

pub use birth_year::{BirthYearStats, birth_year_stats};
pub use categorical::{CategoryCount, counts_by_category};
pub use duration::{TotalDuration, mean_duration, total_duration};
pub use frequency::{mode, most_frequent_pair};
pub use tally::Tally;
