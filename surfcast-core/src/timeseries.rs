//! Historical offshore buoy measurements.

use crate::errors::{SurfError, SurfResult};
use crate::interpolate::{interpolate_direction, interpolate_linear};
use crate::waves::WaveState;
use chrono::{DateTime, Utc};
use ndarray::Array1;

pub type FloatValue = f64;
pub type Time = DateTime<Utc>;

/// Seconds since the Unix epoch, used as the numeric interpolation axis.
fn epoch_seconds(time: &Time) -> FloatValue {
    time.timestamp() as FloatValue + time.timestamp_subsec_nanos() as FloatValue * 1e-9
}

/// Time series of bulk wave parameters measured at an offshore buoy.
///
/// Timestamps are strictly increasing. Heights are significant wave heights
/// (m), periods are peak periods (s) and directions are coming-from azimuths
/// (degrees).
#[derive(Debug, Clone, PartialEq)]
pub struct BuoySeries {
    times: Vec<Time>,
    heights: Array1<FloatValue>,
    periods: Array1<FloatValue>,
    directions: Array1<FloatValue>,
}

impl Default for BuoySeries {
    fn default() -> Self {
        Self::empty()
    }
}

impl BuoySeries {
    /// Build a series from parallel columns.
    ///
    /// Returns an error if the columns differ in length or the timestamps are
    /// not strictly increasing.
    pub fn new(
        times: Vec<Time>,
        heights: Vec<FloatValue>,
        periods: Vec<FloatValue>,
        directions: Vec<FloatValue>,
    ) -> SurfResult<Self> {
        let expected = times.len();
        for (field, actual) in [
            ("heights", heights.len()),
            ("periods", periods.len()),
            ("directions", directions.len()),
        ] {
            if actual != expected {
                return Err(SurfError::SeriesLengthMismatch {
                    field: field.to_string(),
                    expected,
                    actual,
                });
            }
        }

        if let Some(index) = times.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(SurfError::NonIncreasingTime {
                index: index + 1,
                previous: times[index],
                current: times[index + 1],
            });
        }

        Ok(Self {
            times,
            heights: Array1::from(heights),
            periods: Array1::from(periods),
            directions: Array1::from(directions),
        })
    }

    pub fn empty() -> Self {
        Self {
            times: Vec::new(),
            heights: Array1::zeros(0),
            periods: Array1::zeros(0),
            directions: Array1::zeros(0),
        }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[Time] {
        &self.times
    }

    pub fn heights(&self) -> &Array1<FloatValue> {
        &self.heights
    }

    pub fn periods(&self) -> &Array1<FloatValue> {
        &self.periods
    }

    pub fn directions(&self) -> &Array1<FloatValue> {
        &self.directions
    }

    /// Wave state at an arbitrary time.
    ///
    /// Height and period are interpolated linearly, direction on the circle.
    /// Times outside the sampled range take the nearest end sample.
    /// Returns `None` for an empty series.
    pub fn at(&self, time: Time) -> Option<WaveState> {
        if self.is_empty() {
            return None;
        }
        let xs: Vec<FloatValue> = self.times.iter().map(epoch_seconds).collect();
        let target = epoch_seconds(&time);

        let height = interpolate_linear(&xs, self.heights.as_slice()?, target)?;
        let period = interpolate_linear(&xs, self.periods.as_slice()?, target)?;
        let direction = interpolate_direction(&xs, self.directions.as_slice()?, target)?;
        Some(WaveState::new(height, period, direction))
    }

    /// Samples taken at or after `cutoff`.
    pub fn since(&self, cutoff: Time) -> BuoySeries {
        let start = self.times.partition_point(|t| *t < cutoff);
        Self {
            times: self.times[start..].to_vec(),
            heights: self.heights.slice(ndarray::s![start..]).to_owned(),
            periods: self.periods.slice(ndarray::s![start..]).to_owned(),
            directions: self.directions.slice(ndarray::s![start..]).to_owned(),
        }
    }

    /// Hours elapsed since the first sample for every timestamp.
    pub fn hours_since_start(&self) -> Array1<FloatValue> {
        match self.times.first() {
            Some(first) => self
                .times
                .iter()
                .map(|t| (epoch_seconds(t) - epoch_seconds(first)) / 3600.0)
                .collect(),
            None => Array1::zeros(0),
        }
    }
}
