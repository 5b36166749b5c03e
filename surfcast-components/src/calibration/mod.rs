//! Site calibration from rated observations
//!
//! Learns how the offshore height at the buoy relates to the breaking height
//! surfers actually see at the beach.
//!
//! # What This Component Does
//!
//! 1. Bins rated observations by offshore direction and period and learns a
//!    correction factor per bin:
//!    $$K_{site} = \mathrm{median}\left(\frac{H_{b,observed}}{H_{s,offshore}}\right)$$
//! 2. Multiplies the offshore height by the matching factor before the
//!    nearshore transformation. Bins without a factor leave it unchanged.
//! 3. Tracks sandbar migration through the bar-state index, the ratio of the
//!    mean factor learned over the recent window to the mean factor learned
//!    from older observations. Above 1 the bar has moved shoreward, below 1
//!    offshore.
//! 4. Reports average ratings by tide and wind bin.
//!
//! Insufficient data never fails: it yields no factors, an index of 1 or an
//! empty report.

mod correction;
mod preferences;

pub use correction::{BinRange, CorrectionBin, CorrectionFactors};
pub use preferences::{
    rating_preferences, PreferenceBin, PreferenceReport, TideBin, WindBin,
};

use crate::observation::{CalibrationQuality, Observation, ObservationLog};
use crate::parameters::CalibrationParameters;
use crate::quality::QualityScorer;
use chrono::Duration;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use surfcast_core::timeseries::{FloatValue, Time};
use surfcast_core::units::wrap_direction;
use surfcast_core::utils::statistics::median;

/// Everything the calibration knows about a site at one time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationStatus {
    pub correction_factors: CorrectionFactors,
    pub tide_preferences: PreferenceReport<TideBin>,
    pub wind_preferences: PreferenceReport<WindBin>,
    pub bar_state_index: FloatValue,
    pub total_observations: usize,
    pub rated_observations: usize,
    pub quality: CalibrationQuality,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteCalibrationEngine {
    parameters: CalibrationParameters,
}

impl SiteCalibrationEngine {
    pub fn from_parameters(parameters: CalibrationParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &CalibrationParameters {
        &self.parameters
    }

    /// Window within which a rating is matched to an observation.
    pub fn rating_window(&self) -> Duration {
        Duration::minutes(self.parameters.rating_match_window_minutes)
    }

    /// Learn correction factors from the rated observations among `observations`.
    ///
    /// Unrated observations are ignored. Returns no factors when fewer than
    /// `min_rated_observations` are rated. Only observations with a positive
    /// offshore height contribute, and bins with fewer than `min_bin_samples`
    /// contributions are left out.
    pub fn compute_correction_factors<'a, I>(&self, observations: I) -> CorrectionFactors
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        let p = &self.parameters;
        let rated: Vec<&Observation> = observations.into_iter().filter(|o| o.is_rated()).collect();

        if rated.len() < p.min_rated_observations {
            warn!(
                "Not enough rated observations ({}) to learn correction factors",
                rated.len()
            );
            return CorrectionFactors::new();
        }

        let direction_bins = BinRange::from_edges(&p.direction_bins);
        let period_bins = BinRange::from_edges(&p.period_bins);
        let last_direction = direction_bins.len().saturating_sub(1);

        let mut factors = CorrectionFactors::new();
        for (i, direction) in direction_bins.iter().enumerate() {
            // Last direction bin also learns from swell past its upper edge
            let learns_from = |d: FloatValue| {
                direction.contains(d) || (i == last_direction && d >= direction.lower)
            };
            for period in &period_bins {
                let ratios: Vec<FloatValue> = rated
                    .iter()
                    .filter(|o| {
                        learns_from(wrap_direction(o.offshore.direction))
                            && period.contains(o.offshore.period)
                            && o.offshore.height > 0.0
                    })
                    .map(|o| o.observed_breaking_height() / o.offshore.height)
                    .collect();

                if ratios.len() < p.min_bin_samples {
                    continue;
                }
                let Some(factor) = median(&ratios) else {
                    continue;
                };

                info!(
                    "K_site({}-{} deg, {}-{} s) = {:.3} (n={})",
                    direction.lower,
                    direction.upper,
                    period.lower,
                    period.upper,
                    factor,
                    ratios.len()
                );
                factors.push(CorrectionBin {
                    direction: *direction,
                    period: *period,
                    factor,
                    samples: ratios.len(),
                });
            }
        }
        factors
    }

    /// Offshore height corrected for the site.
    pub fn apply_correction(
        &self,
        height: FloatValue,
        direction: FloatValue,
        period: FloatValue,
        factors: &CorrectionFactors,
    ) -> FloatValue {
        factors.apply(height, direction, period)
    }

    /// Ratio of recent to long-term mean correction factor.
    ///
    /// Observations at or after `reference_time - bar_state_window_days` are
    /// recent. Returns 1 when there are too few observations overall or on
    /// either side of the split, or when either side learns no factors.
    pub fn bar_state_index(&self, observations: &[Observation], reference_time: Time) -> FloatValue {
        let p = &self.parameters;
        if observations.len() < p.bar_state_min_observations {
            return 1.0;
        }

        let cutoff = reference_time - Duration::days(p.bar_state_window_days);
        let (recent, long_term): (Vec<&Observation>, Vec<&Observation>) =
            observations.iter().partition(|o| o.timestamp >= cutoff);

        if recent.len() < p.bar_state_min_window_observations
            || long_term.len() < p.bar_state_min_window_observations
        {
            return 1.0;
        }

        let recent_mean = self.compute_correction_factors(recent).mean_factor();
        let long_term_mean = self.compute_correction_factors(long_term).mean_factor();

        match (recent_mean, long_term_mean) {
            (Some(recent), Some(long_term)) if long_term > 0.0 => recent / long_term,
            _ => 1.0,
        }
    }

    /// Ratings binned by tide level relative to `mean_tide`.
    pub fn tide_preferences<'a, I>(
        &self,
        observations: I,
        mean_tide: FloatValue,
    ) -> PreferenceReport<TideBin>
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        rating_preferences(observations, self.parameters.min_rated_observations, |o| {
            TideBin::classify(o.local.tide - mean_tide)
        })
    }

    /// Wind is classified with the scorer's offshore and onshore sectors.
    pub fn wind_preferences<'a, I>(
        &self,
        observations: I,
        scorer: &QualityScorer,
    ) -> PreferenceReport<WindBin>
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        rating_preferences(observations, self.parameters.min_rated_observations, |o| {
            WindBin::classify(
                scorer.classify_wind_type(o.local.wind_direction),
                o.local.wind_speed,
            )
        })
    }

    /// Recompute every calibration product from the log.
    pub fn status(
        &self,
        log: &ObservationLog,
        scorer: &QualityScorer,
        reference_time: Time,
    ) -> CalibrationStatus {
        let observations = log.observations();
        CalibrationStatus {
            correction_factors: self.compute_correction_factors(observations),
            tide_preferences: self.tide_preferences(observations, scorer.parameters().mean_tide),
            wind_preferences: self.wind_preferences(observations, scorer),
            bar_state_index: self.bar_state_index(observations, reference_time),
            total_observations: log.len(),
            rated_observations: log.rated_count(),
            quality: log.calibration_quality(),
        }
    }
}
