//! Output formatting and persistence for query results.
//!
//! Supports the human-readable report, JSON serialization, a raw-row preview
//! and appending a flat summary row to a CSV file.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fmt;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::debug;

use crate::record::TripRecord;
use crate::report::{QueryOutcome, TripReport};
use crate::stats::CategoryCount;

const RULE_WIDTH: usize = 40;

/// Formats an integer with `,` thousands separators.
pub fn with_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Renders a query outcome as the plain-text report shown to users.
pub fn render_text(outcome: &QueryOutcome) -> String {
    match outcome {
        QueryOutcome::Empty { .. } => "The filters resulted in an empty dataset.\n".to_string(),
        QueryOutcome::Report(report) => report.to_string(),
    }
}

impl fmt::Display for TripReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let common = "The most common";

        writeln!(f, "\nThe Most Frequent Times of Travel\n")?;
        writeln!(f, "{} month for bikeshare usage is {}", common, self.times.month)?;
        writeln!(f, "{} day for bikeshare usage is {}", common, self.times.day)?;
        writeln!(
            f,
            "{} start hour for bikeshare usage is {}",
            common, self.times.start_hour
        )?;
        writeln!(f, "{}", rule())?;

        writeln!(f, "\nThe Most Popular Stations and Trip\n")?;
        writeln!(
            f,
            "The most commonly used start station is {}",
            self.stations.start_station
        )?;
        writeln!(
            f,
            "The most commonly used end station is {}",
            self.stations.end_station
        )?;
        let (from, to) = &self.stations.trip;
        writeln!(f, "The most frequent trip is from {} to {}", from, to)?;
        writeln!(f, "{}", rule())?;

        writeln!(f, "\nTrip Duration\n")?;
        let total = self.durations.total;
        writeln!(
            f,
            "Users used the bikeshare system for a total of {} hours and {} minutes.",
            with_thousands(total.hours),
            total.minutes
        )?;
        writeln!(
            f,
            "The average trip lasted {} minutes.",
            self.durations.mean_minutes
        )?;
        writeln!(f, "{}", rule())?;

        writeln!(f, "\nUser Stats\n")?;
        for CategoryCount { value, count } in &self.users.user_types {
            writeln!(
                f,
                "There were {} {}s.",
                with_thousands(*count as i64),
                value.to_lowercase()
            )?;
        }
        writeln!(f)?;

        let city = self.query.city;
        match &self.users.genders {
            Some(genders) => {
                for CategoryCount { value, count } in genders {
                    writeln!(
                        f,
                        "There were {} {} users.",
                        with_thousands(*count as i64),
                        value
                    )?;
                }
            }
            None => writeln!(f, "{} dataset does not contain data on gender.", city)?,
        }
        writeln!(f)?;

        match &self.users.birth_years {
            Some(years) => {
                writeln!(f, "The earliest birth year is {}.", years.earliest)?;
                writeln!(f, "The most recent birth year is {}.", years.latest)?;
                writeln!(f, "The most common birth year is {}.", years.most_common)?;
            }
            None if city.has_demographics() => {
                writeln!(f, "No birth years were recorded for this selection.")?
            }
            None => writeln!(f, "{} dataset does not contain data on birth year.", city)?,
        }
        writeln!(f, "{}", rule())
    }
}

/// A window of raw records rendered as a fixed-width table.
pub struct RowsPage<'a> {
    pub records: &'a [TripRecord],
    pub offset: usize,
    pub count: usize,
}

impl fmt::Display for RowsPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<20} {:>10}  {:<32} {:<32} {:<11} {:<7} {:>5}",
            "Start Time", "Duration", "Start Station", "End Station", "User Type", "Gender", "Born"
        )?;
        for r in self.records.iter().skip(self.offset).take(self.count) {
            writeln!(
                f,
                "{:<20} {:>10.1}  {:<32} {:<32} {:<11} {:<7} {:>5}",
                r.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
                r.duration_seconds,
                r.start_station,
                r.end_station,
                r.user_type.as_deref().unwrap_or("-"),
                r.gender.as_deref().unwrap_or("-"),
                r.birth_year.map_or_else(|| "-".to_string(), |y| y.to_string()),
            )?;
        }
        Ok(())
    }
}

/// Renders up to `count` records starting at `offset` as a fixed-width table.
pub fn render_rows(records: &[TripRecord], offset: usize, count: usize) -> String {
    RowsPage {
        records,
        offset,
        count,
    }
    .to_string()
}

/// Logs a query outcome using Rust's debug pretty-print format.
pub fn print_pretty(outcome: &QueryOutcome) {
    debug!("{:#?}", outcome);
}

/// Serializes a query outcome as pretty-printed JSON.
pub fn to_json(outcome: &QueryOutcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

/// One flattened CSV row summarising a query outcome.
#[derive(Debug, Default, Serialize)]
pub struct SummaryRow {
    pub timestamp: DateTime<Utc>,
    pub city: String,
    pub month: String,
    pub day: String,
    pub trips: usize,
    pub popular_month: Option<String>,
    pub popular_day: Option<String>,
    pub popular_hour: Option<String>,
    pub popular_start_station: Option<String>,
    pub popular_end_station: Option<String>,
    pub popular_trip: Option<String>,
    pub total_hours: Option<i64>,
    pub total_minutes: Option<i64>,
    pub mean_minutes: Option<i64>,
    pub top_user_type: Option<String>,
    pub most_common_birth_year: Option<i32>,
}

impl SummaryRow {
    pub fn from_outcome(outcome: &QueryOutcome) -> Self {
        match outcome {
            QueryOutcome::Empty { query } => SummaryRow {
                timestamp: Utc::now(),
                city: query.city.to_string(),
                month: query.month.to_string(),
                day: query.day.to_string(),
                ..Default::default()
            },
            QueryOutcome::Report(r) => SummaryRow {
                timestamp: Utc::now(),
                city: r.query.city.to_string(),
                month: r.query.month.to_string(),
                day: r.query.day.to_string(),
                trips: r.trips,
                popular_month: Some(r.times.month.clone()),
                popular_day: Some(r.times.day.clone()),
                popular_hour: Some(r.times.start_hour.clone()),
                popular_start_station: Some(r.stations.start_station.clone()),
                popular_end_station: Some(r.stations.end_station.clone()),
                popular_trip: Some(format!("{} -> {}", r.stations.trip.0, r.stations.trip.1)),
                total_hours: Some(r.durations.total.hours),
                total_minutes: Some(r.durations.total.minutes),
                mean_minutes: Some(r.durations.mean_minutes),
                top_user_type: r.users.user_types.first().map(|c| c.value.clone()),
                most_common_birth_year: r.users.birth_years.map(|b| b.most_common),
            },
        }
    }
}

/// Appends a [`SummaryRow`] to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, row: &SummaryRow) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(row)?;
    writer.flush()?;

    Ok(())
}
