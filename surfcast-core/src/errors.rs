use chrono::{DateTime, Utc};
use thiserror::Error;

/// Error type for invalid operations.
///
/// The physical solvers never return errors; invalid physical input degrades to
/// neutral values instead. These variants cover caller contract violations only.
#[derive(Error, Debug)]
pub enum SurfError {
    #[error("Series length mismatch: {field} has {actual} values, expected {expected}")]
    SeriesLengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },
    #[error("Timestamps must be strictly increasing. {current} at index {index} does not follow {previous}")]
    NonIncreasingTime {
        index: usize,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },
    #[error("Rating must be within 0-10, got {0}")]
    InvalidRating(f64),
    #[error("Observation at {0} has already been rated")]
    AlreadyRated(DateTime<Utc>),
    #[error("No observation within {window_minutes} minutes of {timestamp}")]
    ObservationNotFound {
        timestamp: DateTime<Utc>,
        window_minutes: i64,
    },
    #[error("Invalid {name} bin edges {edges:?}. Edges must be finite and strictly ascending with at least two values")]
    InvalidBinEdges { name: String, edges: Vec<f64> },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience type for `Result<T, SurfError>`.
pub type SurfResult<T> = Result<T, SurfError>;
