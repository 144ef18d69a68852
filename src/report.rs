//! A query over one city's trips and the report it produces.
//!
//! The report groups the statistics into four sections: times of travel,
//! stations, trip duration and users. Each section is computed in its own
//! span so that its elapsed time shows up in the logs.

use serde::Serialize;
use tracing::{debug, info};

use crate::city::City;
use crate::error::StatsResult;
use crate::filter::{DaySelector, MonthSelector, filter};
use crate::record::{Field, RecordSet};
use crate::stats::{
    BirthYearStats, CategoryCount, TotalDuration, birth_year_stats, counts_by_category,
    mean_duration, mode, most_frequent_pair, total_duration,
};

/// The selection a user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Query {
    pub city: City,
    pub month: MonthSelector,
    pub day: DaySelector,
}

impl Query {
    pub fn new(city: City, month: MonthSelector, day: DaySelector) -> Self {
        Self { city, month, day }
    }

    /// Narrows `records` to this query's month and day.
    pub fn select(&self, records: &RecordSet) -> RecordSet {
        filter(records, self.month, self.day)
    }

    /// Filters `records` and computes every report section over the result.
    #[tracing::instrument(skip(records), fields(city = %self.city, month = %self.month, day = %self.day))]
    pub fn run(&self, records: &RecordSet) -> StatsResult<QueryOutcome> {
        let subset = self.select(records);
        info!(total = records.len(), selected = subset.len(), "Filter applied");

        if subset.is_empty() {
            return Ok(QueryOutcome::Empty { query: *self });
        }

        Ok(QueryOutcome::Report(TripReport::from_subset(*self, &subset)?))
    }
}

/// Result of running a [`Query`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// The filters matched no trips.
    Empty { query: Query },
    Report(TripReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    pub month: String,
    pub day: String,
    pub start_hour: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub start_station: String,
    pub end_station: String,
    pub trip: (String, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationStats {
    pub total: TotalDuration,
    pub mean_minutes: i64,
}

/// Rider breakdowns; demographic parts are `None` for datasets without them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<CategoryCount>,
    pub genders: Option<Vec<CategoryCount>>,
    pub birth_years: Option<BirthYearStats>,
}

/// All statistics for a non-empty selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripReport {
    pub query: Query,
    pub trips: usize,
    pub times: TimeStats,
    pub stations: StationStats,
    pub durations: DurationStats,
    pub users: UserStats,
}

impl TripReport {
    /// Builds a report over an already filtered, non-empty subset.
    pub fn from_subset(query: Query, subset: &RecordSet) -> StatsResult<Self> {
        Ok(TripReport {
            query,
            trips: subset.len(),
            times: time_stats(subset)?,
            stations: station_stats(subset)?,
            durations: duration_stats(subset)?,
            users: user_stats(subset)?,
        })
    }
}

/// Most frequent month, day and start hour.
#[tracing::instrument(skip_all, fields(records = subset.len()))]
pub fn time_stats(subset: &RecordSet) -> StatsResult<TimeStats> {
    let stats = TimeStats {
        month: mode(subset, Field::Month)?.to_string(),
        day: mode(subset, Field::DayOfWeek)?.to_string(),
        start_hour: mode(subset, Field::StartHour)?.to_string(),
    };
    debug!(?stats, "Time stats computed");
    Ok(stats)
}

/// Most popular start station, end station and trip.
#[tracing::instrument(skip_all, fields(records = subset.len()))]
pub fn station_stats(subset: &RecordSet) -> StatsResult<StationStats> {
    let (from, to) = most_frequent_pair(subset, Field::StartStation, Field::EndStation)?;
    let stats = StationStats {
        start_station: mode(subset, Field::StartStation)?.to_string(),
        end_station: mode(subset, Field::EndStation)?.to_string(),
        trip: (from.to_string(), to.to_string()),
    };
    debug!(?stats, "Station stats computed");
    Ok(stats)
}

#[tracing::instrument(skip_all, fields(records = subset.len()))]
pub fn duration_stats(subset: &RecordSet) -> StatsResult<DurationStats> {
    let stats = DurationStats {
        total: total_duration(subset)?,
        mean_minutes: mean_duration(subset)?,
    };
    debug!(?stats, "Duration stats computed");
    Ok(stats)
}

/// User-type counts, plus gender counts and birth years where the dataset has them.
#[tracing::instrument(skip_all, fields(records = subset.len(), city = %subset.city()))]
pub fn user_stats(subset: &RecordSet) -> StatsResult<UserStats> {
    let user_types = counts_by_category(subset, Field::UserType)?;

    let (genders, birth_years) = if subset.city().has_demographics() {
        let genders = counts_by_category(subset, Field::Gender)?;
        // a selection can hold only riders with blank birth years
        let birth_years = birth_year_stats(subset).ok();
        (Some(genders), birth_years)
    } else {
        debug!("Dataset has no demographics, skipping gender and birth year");
        (None, None)
    };

    Ok(UserStats {
        user_types,
        genders,
        birth_years,
    })
}
