//! Calibration Parameters
//!
//! Parameters for learning site correction factors from rated observations.

use serde::{Deserialize, Serialize};
use surfcast_core::errors::{SurfError, SurfResult};
use surfcast_core::timeseries::FloatValue;

/// Parameters for the site calibration engine
///
/// Correction factors are learned per (direction, period) bin as
///
/// $$K_{site} = \mathrm{median}\left(\frac{H_{b,observed}}{H_{s,offshore}}\right)$$
///
/// Consecutive pairs of edges define the bins. The last direction bin is
/// open above its lower edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationParameters {
    /// Direction bin edges, coming-from
    /// unit: degrees
    /// default: [45, 60, 90, 120, 180]
    pub direction_bins: Vec<FloatValue>,

    /// Period bin edges
    /// unit: s
    /// default: [7, 10, 14]
    pub period_bins: Vec<FloatValue>,

    /// Rated observations required before any factor is learned
    /// default: 5
    pub min_rated_observations: usize,

    /// Samples required in a bin before its factor is learned
    /// default: 3
    pub min_bin_samples: usize,

    /// Length of the recent window for the bar-state index
    /// unit: days
    /// default: 30
    pub bar_state_window_days: i64,

    /// Observations (rated or not) required before the bar-state index departs from 1
    /// default: 10
    pub bar_state_min_observations: usize,

    /// Observations required on each side of the bar-state split
    /// default: 5
    pub bar_state_min_window_observations: usize,

    /// Maximum distance between a rating and the observation it is attached to
    /// unit: minutes
    /// default: 60
    pub rating_match_window_minutes: i64,
}

impl Default for CalibrationParameters {
    fn default() -> Self {
        Self {
            direction_bins: vec![45.0, 60.0, 90.0, 120.0, 180.0],
            period_bins: vec![7.0, 10.0, 14.0],
            min_rated_observations: 5,
            min_bin_samples: 3,
            bar_state_window_days: 30,
            bar_state_min_observations: 10,
            bar_state_min_window_observations: 5,
            rating_match_window_minutes: 60,
        }
    }
}

impl CalibrationParameters {
    /// Check that both sets of bin edges are finite and strictly ascending.
    pub fn validate(&self) -> SurfResult<()> {
        validate_edges("direction", &self.direction_bins)?;
        validate_edges("period", &self.period_bins)?;
        if self.rating_match_window_minutes <= 0 {
            return Err(SurfError::Config(format!(
                "rating_match_window_minutes must be positive, got {}",
                self.rating_match_window_minutes
            )));
        }
        Ok(())
    }
}

fn validate_edges(name: &str, edges: &[FloatValue]) -> SurfResult<()> {
    let ascending = edges.windows(2).all(|pair| pair[0] < pair[1]);
    if edges.len() < 2 || !ascending || edges.iter().any(|e| !e.is_finite()) {
        return Err(SurfError::InvalidBinEdges {
            name: name.to_string(),
            edges: edges.to_vec(),
        });
    }
    Ok(())
}
