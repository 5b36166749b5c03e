//! Multiplicative penalties for poor combinations of conditions.
//!
//! Every penalty multiplies against an identity of 1, so the order they are
//! applied in does not matter.

use super::WindType;
use surfcast_core::timeseries::FloatValue;
use surfcast_core::units::wrap_direction;

/// Inputs the penalty chain looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyInputs {
    /// Surf height (ft)
    pub height_ft: FloatValue,
    /// Peak period (s)
    pub period: FloatValue,
    /// Breaking angle from the shore normal (degrees)
    pub breaking_angle: FloatValue,
    pub wind_type: WindType,
    /// Tide level relative to the mean (m)
    pub tide_anomaly: FloatValue,
    /// Swell coming-from direction (degrees)
    pub swell_direction: FloatValue,
}

/// Product of every penalty that applies, in (0, 1].
pub fn penalty_multiplier(inputs: &PenaltyInputs) -> FloatValue {
    let onshore = inputs.wind_type == WindType::Onshore;
    let h = inputs.height_ft;
    let swell = wrap_direction(inputs.swell_direction);

    let penalties = [
        // Small surf with onshore wind
        (h < 3.0 && onshore, 0.1),
        // Very small surf
        (h < 2.5, 0.2),
        // Small surf
        (h < 3.0, 0.4),
        (onshore, 0.3),
        // Southerly swell is shadowed at this beach
        ((180.0..=225.0).contains(&swell), 0.7),
        // Big short-period surf closes out
        (h > 8.0 && inputs.period < 8.0, 0.5),
        (onshore && inputs.period < 7.0, 0.5),
        // Straight-in waves with onshore wind
        (inputs.breaking_angle.abs() < 5.0 && onshore, 0.4),
        // Large surf at extreme tides
        (inputs.tide_anomaly.abs() > 0.8 && h > 6.0, 0.8),
    ];

    penalties
        .iter()
        .filter(|(applies, _)| *applies)
        .map(|(_, factor)| factor)
        .product()
}
