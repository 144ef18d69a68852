//! Loading a city's trip CSV into a [`RecordSet`].
//!
//! Files are looked up as `<data_dir>/<city file>`; when that is missing a
//! gzip-compressed `<city file>.gz` is read instead.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use flate2::read::GzDecoder;
use serde::Deserialize;
use tracing::{debug, info};

use crate::city::City;
use crate::error::{DatasetError, DatasetResult};
use crate::record::{RecordSet, TripRecord};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A single row as it appears in the trip CSV files.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    trip_duration: String,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<String>,
}

fn parse_error(row: usize, column: &str, raw: &str, message: impl ToString) -> DatasetError {
    DatasetError::Parse {
        row,
        column: column.to_string(),
        raw: raw.to_string(),
        message: message.to_string(),
    }
}

fn parse_timestamp(row: usize, column: &str, raw: &str) -> DatasetResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
        .map_err(|e| parse_error(row, column, raw, e))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl RawTrip {
    fn into_record(self, row: usize) -> DatasetResult<TripRecord> {
        let start_time = parse_timestamp(row, "Start Time", &self.start_time)?;
        let end_time = match non_blank(self.end_time) {
            Some(raw) => Some(parse_timestamp(row, "End Time", &raw)?),
            None => None,
        };

        let duration_seconds: f64 = self
            .trip_duration
            .trim()
            .parse()
            .map_err(|e| parse_error(row, "Trip Duration", &self.trip_duration, e))?;
        if !duration_seconds.is_finite() || duration_seconds < 0.0 {
            return Err(parse_error(
                row,
                "Trip Duration",
                &self.trip_duration,
                "duration must be a non-negative number",
            ));
        }

        // birth years are written as floats ("1992.0") in some exports
        let birth_year = match non_blank(self.birth_year) {
            Some(raw) => {
                let year: f64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| parse_error(row, "Birth Year", &raw, e))?;
                if !year.is_finite()
                    || year.fract() != 0.0
                    || year < f64::from(i32::MIN)
                    || year > f64::from(i32::MAX)
                {
                    return Err(parse_error(
                        row,
                        "Birth Year",
                        &raw,
                        "birth year must be a whole number",
                    ));
                }
                Some(year as i32)
            }
            None => None,
        };

        Ok(TripRecord {
            start_time,
            end_time,
            duration_seconds,
            start_station: self.start_station,
            end_station: self.end_station,
            user_type: non_blank(self.user_type),
            gender: non_blank(self.gender),
            birth_year,
        })
    }
}

/// Reads trip rows for `city` from any reader producing CSV with headers.
pub fn read_trips<R: Read>(city: City, reader: R) -> DatasetResult<RecordSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut records = Vec::new();
    for (i, result) in rdr.deserialize::<RawTrip>().enumerate() {
        let raw = result?;
        records.push(raw.into_record(i + 1)?);
    }

    debug!(city = %city, rows = records.len(), "Trip rows parsed");
    Ok(RecordSet::new(city, records))
}

/// Path of the file that holds `city`'s trips under `data_dir`.
///
/// Prefers the plain CSV; falls back to `<file>.gz` when only that exists.
pub fn dataset_path(data_dir: &Path, city: City) -> PathBuf {
    let plain = data_dir.join(city.file_name());
    if plain.exists() {
        return plain;
    }
    let gz = data_dir.join(format!("{}.gz", city.file_name()));
    if gz.exists() { gz } else { plain }
}

/// Loads the complete dataset for `city` from `data_dir`.
#[tracing::instrument(skip(data_dir), fields(data_dir = %data_dir.display()))]
pub fn load_city(data_dir: &Path, city: City) -> DatasetResult<RecordSet> {
    let path = dataset_path(data_dir, city);
    let file = File::open(&path)?;

    let is_gzip = path.extension().and_then(|e| e.to_str()) == Some("gz");
    let records = if is_gzip {
        read_trips(city, GzDecoder::new(BufReader::new(file)))?
    } else {
        read_trips(city, BufReader::new(file))?
    };

    info!(path = %path.display(), gzip = is_gzip, rows = records.len(), "Dataset loaded");
    Ok(records)
}
