//! Trend Parameters

use serde::{Deserialize, Serialize};
use surfcast_core::timeseries::FloatValue;

/// Parameters for swell trend classification and the score adjustment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendParameters {
    /// Length of the analysed window before the reference time
    /// unit: hours
    /// default: 24
    pub window_hours: i64,

    /// Height slope separating steady from rising or falling swell
    /// unit: m/hour
    /// default: 0.05
    pub slope_threshold: FloatValue,

    /// Height change over the window separating steady from rising or falling swell
    /// unit: m
    /// default: 0.2
    pub change_threshold: FloatValue,

    /// Height slope above which a rising short-period swell is treated as wind chop
    /// unit: m/hour
    /// default: 0.1
    pub rapid_slope: FloatValue,

    /// Periods below this are short-period wind swell
    /// unit: s
    /// default: 8.0
    pub short_period: FloatValue,

    /// Periods at or above this are groundswell
    /// unit: s
    /// default: 10.0
    pub long_period: FloatValue,

    /// Adjustment for rapidly rising short-period swell
    /// default: -0.5
    pub rising_wind_swell: FloatValue,

    /// Adjustment for rising groundswell
    /// default: 0.2
    pub rising_groundswell: FloatValue,

    /// Adjustment for slowly easing groundswell
    /// default: 0.3
    pub easing_groundswell: FloatValue,

    /// Adjustment for any other falling swell
    /// default: -0.2
    pub falling: FloatValue,
}

impl Default for TrendParameters {
    fn default() -> Self {
        Self {
            window_hours: 24,
            slope_threshold: 0.05,
            change_threshold: 0.2,
            rapid_slope: 0.1,
            short_period: 8.0,
            long_period: 10.0,
            rising_wind_swell: -0.5,
            rising_groundswell: 0.2,
            easing_groundswell: 0.3,
            falling: -0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_deserialization() {
        let json = r#"{"window_hours": 12}"#;
        let params: TrendParameters =
            serde_json::from_str(json).expect("Partial deserialization failed");
        assert_eq!(params.window_hours, 12);
        assert!((params.slope_threshold - 0.05).abs() < 1e-10);
        assert!((params.falling + 0.2).abs() < 1e-10);
    }
}
