//! Piecewise-linear sub-scores.
//!
//! Each function maps one physical quantity onto [0, 1]. The breakpoints are
//! tuned for an east-facing beach break with a shore normal near 110°.

use super::WindType;
use surfcast_core::timeseries::FloatValue;
use surfcast_core::units::wrap_direction;

/// Sub-score for the surf height in feet.
///
/// Below 3 ft is barely rideable, 7-9 ft scores best and anything above
/// 10 ft is treated as closing out.
pub fn height_subscore(height_ft: FloatValue) -> FloatValue {
    let h = height_ft;
    if h < 2.0 {
        0.0
    } else if h < 2.5 {
        0.02
    } else if h < 3.0 {
        0.05
    } else if h < 3.5 {
        0.10
    } else if h < 4.0 {
        0.15
    } else if h < 4.5 {
        0.25
    } else if h < 5.0 {
        0.35
    } else if h < 6.0 {
        0.35 + 0.25 * (h - 5.0)
    } else if h < 7.0 {
        0.60 + 0.20 * (h - 6.0)
    } else if h <= 8.0 {
        0.80 + 0.15 * (h - 7.0)
    } else if h <= 9.0 {
        0.95 + 0.05 * (h - 8.0)
    } else if h <= 10.0 {
        1.0 - 0.30 * (h - 9.0)
    } else {
        0.2
    }
}

/// Sub-score for the peak period in seconds, best between 9 and 14 s.
pub fn period_subscore(period: FloatValue) -> FloatValue {
    let t = period;
    if t < 5.0 {
        0.1
    } else if t < 7.0 {
        0.2 + 0.2 * (t - 5.0) / 2.0
    } else if t < 9.0 {
        0.4 + 0.2 * (t - 7.0) / 2.0
    } else if t <= 12.0 {
        0.6 + 0.4 * (t - 9.0) / 3.0
    } else if t <= 14.0 {
        1.0 - 0.1 * (t - 12.0) / 2.0
    } else {
        0.9
    }
}

/// Sub-score for the swell's coming-from direction.
///
/// East to east-north-east (60-90°) is ideal. Directions between the
/// listed sectors (100-120°, 135-180°, and so on) score 0.4.
pub fn swell_direction_subscore(direction: FloatValue) -> FloatValue {
    let d = wrap_direction(direction);
    if (60.0..=90.0).contains(&d) {
        1.0
    } else if (45.0..60.0).contains(&d) {
        0.8 + 0.2 * (d - 45.0) / 15.0
    } else if d > 90.0 && d <= 100.0 {
        1.0 - 0.2 * (d - 90.0) / 10.0
    } else if (120.0..=135.0).contains(&d) {
        0.6 + 0.2 * (135.0 - d) / 15.0
    } else if (180.0..=225.0).contains(&d) {
        0.2 + 0.2 * (225.0 - d) / 45.0
    } else {
        0.4
    }
}

/// Sub-score for the breaking angle from the shore normal in degrees.
///
/// A 10-25° angle peels; near zero the wave closes out.
pub fn breaking_angle_subscore(angle_deg: FloatValue) -> FloatValue {
    let a = angle_deg.abs();
    if (10.0..=25.0).contains(&a) {
        1.0
    } else if (8.0..10.0).contains(&a) {
        0.8 + 0.2 * (a - 8.0) / 2.0
    } else if a > 25.0 && a <= 30.0 {
        1.0 - 0.3 * (a - 25.0) / 5.0
    } else if a < 5.0 {
        0.3
    } else {
        0.5
    }
}

/// 60% swell direction, 40% breaking angle.
pub fn direction_subscore(angle_deg: FloatValue, swell_direction: FloatValue) -> FloatValue {
    0.6 * swell_direction_subscore(swell_direction) + 0.4 * breaking_angle_subscore(angle_deg)
}

/// Sub-score for wind speed (m/s) given its classification.
pub fn wind_subscore(speed: FloatValue, wind_type: WindType) -> FloatValue {
    let u = speed;
    match wind_type {
        WindType::Offshore => {
            if u < 2.0 {
                1.0
            } else if u <= 8.0 {
                1.0 - 0.1 * (u - 2.0) / 6.0
            } else if u <= 12.0 {
                0.9 - 0.3 * (u - 8.0) / 4.0
            } else {
                0.6
            }
        }
        WindType::Cross => {
            if u < 3.0 {
                0.6
            } else if u <= 8.0 {
                0.6 - 0.3 * (u - 3.0) / 5.0
            } else {
                0.2
            }
        }
        WindType::Onshore => {
            if u < 2.0 {
                0.15
            } else if u < 5.0 {
                0.10
            } else if u <= 8.0 {
                0.05
            } else {
                0.0
            }
        }
    }
}

/// Sub-score for the tide level, best within 0.2 m of the mean.
pub fn tide_subscore(tide_level: FloatValue, mean_tide: FloatValue) -> FloatValue {
    let distance = (tide_level - mean_tide).abs();
    if distance <= 0.2 {
        1.0
    } else if distance <= 0.4 {
        0.9 + 0.1 * (0.4 - distance) / 0.2
    } else if distance <= 0.8 {
        0.7 - 0.2 * (distance - 0.4) / 0.4
    } else {
        (0.5 - 0.2 * ((distance - 0.8) / 0.7).min(1.0)).max(0.3)
    }
}
