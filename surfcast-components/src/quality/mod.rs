//! Surf quality scoring
//!
//! Turns physical conditions at the break into a single 0-10 score.
//!
//! # What This Component Does
//!
//! 1. Converts the surf height to feet and computes five sub-scores in [0, 1]
//!    for height, period, direction, wind and tide.
//! 2. Forms the weighted base score
//!    $$S_{base} = \sum_i w_i S_i$$
//! 3. Multiplies by the penalty chain for bad combinations and by the breaker
//!    multiplier, then maps onto 0-10:
//!    $$S = 10 \cdot \mathrm{clamp}(S_{base} \cdot P \cdot M_b, 0, 1)$$
//!
//! The wind is classified from its absolute direction using the site's
//! offshore and onshore sectors. Anything outside both is cross-shore.

mod penalties;
mod subscores;

pub use penalties::{penalty_multiplier, PenaltyInputs};
pub use subscores::{
    breaking_angle_subscore, direction_subscore, height_subscore, period_subscore,
    swell_direction_subscore, tide_subscore, wind_subscore,
};

use crate::parameters::ScoringParameters;
use serde::{Deserialize, Serialize};
use std::fmt;
use surfcast_core::timeseries::FloatValue;
use surfcast_core::transform::BreakerType;
use surfcast_core::units::metres_to_feet;

/// Wind classification relative to the beach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindType {
    Offshore,
    Cross,
    Onshore,
}

impl fmt::Display for WindType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WindType::Offshore => "offshore",
            WindType::Cross => "cross",
            WindType::Onshore => "onshore",
        };
        f.write_str(name)
    }
}

/// Conditions at the break that the score is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfConditions {
    /// Surf height (m)
    pub height: FloatValue,
    /// Peak period (s)
    pub period: FloatValue,
    /// Breaking angle from the shore normal (degrees)
    pub breaking_angle: FloatValue,
    pub breaker_type: Option<BreakerType>,
    /// Wind speed (m/s)
    pub wind_speed: FloatValue,
    /// Wind coming-from direction (degrees)
    pub wind_direction: FloatValue,
    /// Tide level relative to datum (m)
    pub tide_level: FloatValue,
    /// Swell coming-from direction (degrees)
    pub swell_direction: FloatValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub height: FloatValue,
    pub period: FloatValue,
    pub direction: FloatValue,
    pub wind: FloatValue,
    pub tide: FloatValue,
}

/// Score with the breakdown it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityScore {
    /// Final score in [0, 10]
    pub total: FloatValue,
    pub sub_scores: SubScores,
    /// Weighted sum of the sub-scores
    pub base_score: FloatValue,
    pub penalty_multiplier: FloatValue,
    pub breaker_multiplier: FloatValue,
    pub wind_type: WindType,
    /// Surf height used for scoring (ft)
    pub height_ft: FloatValue,
}

/// Scores surf conditions for one site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityScorer {
    parameters: ScoringParameters,
}

impl QualityScorer {
    pub fn from_parameters(parameters: ScoringParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &ScoringParameters {
        &self.parameters
    }

    pub fn classify_wind_type(&self, wind_direction: FloatValue) -> WindType {
        if self.parameters.offshore_wind.contains(wind_direction) {
            WindType::Offshore
        } else if self.parameters.onshore_wind.contains(wind_direction) {
            WindType::Onshore
        } else {
            WindType::Cross
        }
    }

    pub fn breaker_multiplier(&self, breaker_type: Option<BreakerType>) -> FloatValue {
        self.parameters.breaker_multipliers.get(breaker_type)
    }

    pub fn score(&self, conditions: &SurfConditions) -> QualityScore {
        let p = &self.parameters;
        let height_ft = metres_to_feet(conditions.height);
        let wind_type = self.classify_wind_type(conditions.wind_direction);

        let sub_scores = SubScores {
            height: height_subscore(height_ft),
            period: period_subscore(conditions.period),
            direction: direction_subscore(conditions.breaking_angle, conditions.swell_direction),
            wind: wind_subscore(conditions.wind_speed, wind_type),
            tide: tide_subscore(conditions.tide_level, p.mean_tide),
        };

        let w = &p.weights;
        let base_score = w.height * sub_scores.height
            + w.period * sub_scores.period
            + w.direction * sub_scores.direction
            + w.wind * sub_scores.wind
            + w.tide * sub_scores.tide;

        let penalty = penalty_multiplier(&PenaltyInputs {
            height_ft,
            period: conditions.period,
            breaking_angle: conditions.breaking_angle,
            wind_type,
            tide_anomaly: conditions.tide_level - p.mean_tide,
            swell_direction: conditions.swell_direction,
        });
        let breaker_multiplier = self.breaker_multiplier(conditions.breaker_type);

        let total = (10.0 * base_score * penalty * breaker_multiplier).clamp(0.0, 10.0);

        QualityScore {
            total,
            sub_scores,
            base_score,
            penalty_multiplier: penalty,
            breaker_multiplier,
            wind_type,
            height_ft,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use surfcast_core::units::FEET_PER_METRE;

    fn scorer() -> QualityScorer {
        QualityScorer::default()
    }

    fn good_day() -> SurfConditions {
        SurfConditions {
            height: 8.5 / FEET_PER_METRE,
            period: 11.0,
            breaking_angle: 15.0,
            breaker_type: Some(BreakerType::Plunging),
            wind_speed: 1.0,
            wind_direction: 290.0,
            tide_level: 0.0,
            swell_direction: 75.0,
        }
    }

    #[test]
    fn test_wind_classification() {
        let s = scorer();
        assert_eq!(s.classify_wind_type(290.0), WindType::Offshore);
        assert_eq!(s.classify_wind_type(260.0), WindType::Offshore);
        assert_eq!(s.classify_wind_type(90.0), WindType::Onshore);
        assert_eq!(s.classify_wind_type(135.0), WindType::Onshore);
        assert_eq!(s.classify_wind_type(0.0), WindType::Cross);
        assert_eq!(s.classify_wind_type(180.0), WindType::Cross);
        assert_eq!(s.classify_wind_type(-70.0), WindType::Offshore);
    }

    #[test]
    fn test_good_day_score() {
        let score = scorer().score(&good_day());

        let height = 0.95 + 0.05 * 0.5;
        let period = 0.6 + 0.4 * 2.0 / 3.0;
        let expected_base = 0.30 * height + 0.20 * period + 0.15 + 0.30 + 0.05;

        assert_relative_eq!(score.base_score, expected_base, max_relative = 1e-9);
        assert_eq!(score.penalty_multiplier, 1.0);
        assert_eq!(score.breaker_multiplier, 1.0);
        assert_relative_eq!(score.total, 10.0 * expected_base, max_relative = 1e-9);
        assert_eq!(score.wind_type, WindType::Offshore);
    }

    #[test]
    fn test_breaker_type_scales_score() {
        let s = scorer();
        let plunging = s.score(&good_day());
        let surging = s.score(&SurfConditions {
            breaker_type: Some(BreakerType::Surging),
            ..good_day()
        });
        let unknown = s.score(&SurfConditions {
            breaker_type: None,
            ..good_day()
        });
        assert_relative_eq!(surging.total, 0.4 * plunging.total, max_relative = 1e-12);
        assert_relative_eq!(unknown.total, 0.7 * plunging.total, max_relative = 1e-12);
    }

    #[test]
    fn test_extreme_inputs_stay_in_range() {
        let score = scorer().score(&SurfConditions {
            height: 20.0 / FEET_PER_METRE,
            period: 4.0,
            breaking_angle: 0.0,
            breaker_type: Some(BreakerType::Surging),
            wind_speed: 15.0,
            wind_direction: 90.0,
            tide_level: 2.0,
            swell_direction: 200.0,
        });
        assert!(score.total >= 0.0 && score.total <= 10.0);
        assert!(score.total < 0.5, "score {}", score.total);
        assert_eq!(score.wind_type, WindType::Onshore);
    }

    #[test]
    fn test_oversized_weights_are_clamped() {
        let mut params = ScoringParameters::default();
        params.weights.height = 5.0;
        let score = QualityScorer::from_parameters(params).score(&good_day());
        assert_eq!(score.total, 10.0);
    }

    #[test]
    fn test_flat_day_scores_near_zero() {
        let score = scorer().score(&SurfConditions {
            height: 0.3,
            wind_direction: 90.0,
            wind_speed: 6.0,
            ..good_day()
        });
        assert!(score.total < 0.1, "score {}", score.total);
    }
}
