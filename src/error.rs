//! Error types for the statistics engine and its ingestion boundary.

use thiserror::Error;

use crate::city::City;
use crate::record::Field;

/// Convenience result type for aggregator operations.
pub type StatsResult<T> = Result<T, StatsError>;

/// Convenience result type for dataset loading.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Precondition violations reported by the aggregators.
///
/// Callers are expected to check emptiness and field availability before
/// computing statistics; neither variant is recovered from internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// The subset (or every value of the requested field in it) is empty.
    #[error("cannot aggregate an empty record set")]
    EmptyInput,

    /// The requested field is not provided by the dataset variant.
    #[error("the {city} dataset does not contain {field}")]
    MissingField { field: Field, city: City },
}

/// A user-supplied selector string is not one of the enumerated values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("unknown city '{0}' (expected chicago, new york city or washington)")]
    UnknownCity(String),

    #[error("unknown month '{0}' (expected 'all' or a full month name)")]
    UnknownMonth(String),

    #[error("unknown day '{0}' (expected 'all' or a full day name)")]
    UnknownDay(String),
}

/// Error type returned while reading a city's trip file.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A value could not be converted into its typed field.
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    Parse {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}
