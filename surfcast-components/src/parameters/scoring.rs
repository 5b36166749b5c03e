//! Scoring Parameters
//!
//! Weights and multipliers for the surf quality score.

use serde::{Deserialize, Serialize};
use surfcast_core::timeseries::FloatValue;
use surfcast_core::transform::BreakerType;
use surfcast_core::units::wrap_direction;

/// Weights of the five sub-scores in the base score
///
/// The defaults sum to 1, so a perfect set of sub-scores gives a base of 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// default: 0.30
    pub height: FloatValue,
    /// default: 0.20
    pub period: FloatValue,
    /// default: 0.15
    pub direction: FloatValue,
    /// default: 0.30
    pub wind: FloatValue,
    /// default: 0.05
    pub tide: FloatValue,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            height: 0.30,
            period: 0.20,
            direction: 0.15,
            wind: 0.30,
            tide: 0.05,
        }
    }
}

impl ScoreWeights {
    pub fn total(&self) -> FloatValue {
        self.height + self.period + self.direction + self.wind + self.tide
    }
}

/// Score multiplier per breaker type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakerMultipliers {
    /// default: 0.85
    pub spilling: FloatValue,
    /// default: 1.0
    pub plunging: FloatValue,
    /// default: 0.4
    pub surging: FloatValue,
    /// Applied when no breaker type is known
    /// default: 0.7
    pub unclassified: FloatValue,
}

impl Default for BreakerMultipliers {
    fn default() -> Self {
        Self {
            spilling: 0.85,
            plunging: 1.0,
            surging: 0.4,
            unclassified: 0.7,
        }
    }
}

impl BreakerMultipliers {
    pub fn get(&self, breaker_type: Option<BreakerType>) -> FloatValue {
        match breaker_type {
            Some(BreakerType::Spilling) => self.spilling,
            Some(BreakerType::Plunging) => self.plunging,
            Some(BreakerType::Surging) => self.surging,
            None => self.unclassified,
        }
    }
}

/// Closed arc of coming-from directions, clockwise from `from` to `to`
///
/// An arc with `from > to` wraps through north.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionSector {
    /// unit: degrees
    pub from: FloatValue,
    /// unit: degrees
    pub to: FloatValue,
}

impl DirectionSector {
    pub const fn new(from: FloatValue, to: FloatValue) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, direction: FloatValue) -> bool {
        let d = wrap_direction(direction);
        if self.from <= self.to {
            self.from <= d && d <= self.to
        } else {
            d >= self.from || d <= self.to
        }
    }
}

/// Parameters for the surf quality score
///
/// $$S = 10 \cdot \mathrm{clamp}\left(\left(\sum_i w_i S_i\right) P \, M_b, 0, 1\right)$$
///
/// where $S_i$ are the sub-scores, $P$ the penalty multiplier and $M_b$ the
/// breaker multiplier. The sub-score breakpoints are fixed by the scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParameters {
    pub weights: ScoreWeights,

    pub breaker_multipliers: BreakerMultipliers,

    /// Wind directions that blow offshore at the site
    /// default: 260° to 330°
    pub offshore_wind: DirectionSector,

    /// Wind directions that blow onshore at the site
    /// default: 45° to 135°
    pub onshore_wind: DirectionSector,

    /// Mean tide level the tide sub-score is centred on
    /// unit: m
    /// default: 0.0
    pub mean_tide: FloatValue,
}

impl Default for ScoringParameters {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            breaker_multipliers: BreakerMultipliers::default(),
            offshore_wind: DirectionSector::new(260.0, 330.0),
            onshore_wind: DirectionSector::new(45.0, 135.0),
            mean_tide: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = ScoreWeights::default();
        assert!((weights.total() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_breaker_multipliers() {
        let m = BreakerMultipliers::default();
        assert!((m.get(Some(BreakerType::Plunging)) - 1.0).abs() < 1e-10);
        assert!((m.get(Some(BreakerType::Spilling)) - 0.85).abs() < 1e-10);
        assert!((m.get(Some(BreakerType::Surging)) - 0.4).abs() < 1e-10);
        assert!((m.get(None) - 0.7).abs() < 1e-10);
    }

    #[test]
    fn test_sector_contains_edges() {
        let sector = DirectionSector::new(260.0, 330.0);
        assert!(sector.contains(260.0));
        assert!(sector.contains(330.0));
        assert!(sector.contains(290.0 + 360.0));
        assert!(!sector.contains(331.0));
    }

    #[test]
    fn test_sector_wrapping_through_north() {
        let sector = DirectionSector::new(340.0, 20.0);
        assert!(sector.contains(350.0));
        assert!(sector.contains(0.0));
        assert!(sector.contains(20.0));
        assert!(!sector.contains(180.0));
    }

    #[test]
    fn test_partial_deserialization() {
        let json = r#"{"weights": {"wind": 0.4}, "mean_tide": 0.1}"#;
        let params: ScoringParameters =
            serde_json::from_str(json).expect("Partial deserialization failed");

        assert!((params.weights.wind - 0.4).abs() < 1e-10);
        assert!((params.weights.height - 0.30).abs() < 1e-10);
        assert!((params.mean_tide - 0.1).abs() < 1e-10);
        assert_eq!(params.onshore_wind, DirectionSector::new(45.0, 135.0));
    }
}
