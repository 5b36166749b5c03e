//! Swell trend analysis
//!
//! Classifies whether the swell at the buoy is building or easing over the
//! recent window and nudges the surf score accordingly: a fast-building short
//! period wind swell is about to get messy, while a slowly easing groundswell
//! tends to clean up.

use crate::parameters::TrendParameters;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use surfcast_core::timeseries::{BuoySeries, FloatValue, Time};
use surfcast_core::utils::statistics::linear_regression_slope;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendClass {
    Rising,
    Falling,
    Steady,
    Complex,
    InsufficientData,
}

/// Least-squares trend of the buoy series over the analysed window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwellTrend {
    /// dHs/dt (m/hour)
    pub height_slope: FloatValue,
    /// dTp/dt (s/hour)
    pub period_slope: FloatValue,
    /// Last minus first height in the window (m)
    pub height_change: FloatValue,
    /// Last minus first period in the window (s)
    pub period_change: FloatValue,
    pub classification: TrendClass,
    pub samples: usize,
}

impl SwellTrend {
    pub fn insufficient(samples: usize) -> Self {
        Self {
            height_slope: 0.0,
            period_slope: 0.0,
            height_change: 0.0,
            period_change: 0.0,
            classification: TrendClass::InsufficientData,
            samples,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendAnalyzer {
    parameters: TrendParameters,
}

impl TrendAnalyzer {
    pub fn from_parameters(parameters: TrendParameters) -> Self {
        Self { parameters }
    }

    /// Trend over the `window_hours` before `reference_time`.
    pub fn analyze(&self, series: &BuoySeries, reference_time: Time) -> SwellTrend {
        let window = series.since(reference_time - Duration::hours(self.parameters.window_hours));
        let n = window.len();
        if n < 2 {
            return SwellTrend::insufficient(n);
        }

        let hours = window.hours_since_start();
        let heights = window.heights();
        let periods = window.periods();

        let height_slope = linear_regression_slope(hours.view(), heights.view());
        let period_slope = linear_regression_slope(hours.view(), periods.view());
        let height_change = heights[n - 1] - heights[0];
        let period_change = periods[n - 1] - periods[0];

        SwellTrend {
            height_slope,
            period_slope,
            height_change,
            period_change,
            classification: self.classify(height_slope, height_change),
            samples: n,
        }
    }

    pub fn classify(&self, height_slope: FloatValue, height_change: FloatValue) -> TrendClass {
        let slope = self.parameters.slope_threshold;
        let change = self.parameters.change_threshold;

        if height_slope.abs() < slope && height_change.abs() < change {
            TrendClass::Steady
        } else if height_slope > slope || height_change > change {
            TrendClass::Rising
        } else if height_slope < -slope || height_change < -change {
            TrendClass::Falling
        } else {
            TrendClass::Complex
        }
    }

    /// Score adjustment for a trend given the current peak period.
    pub fn adjustment(&self, trend: &SwellTrend, period: FloatValue) -> FloatValue {
        let p = &self.parameters;
        match trend.classification {
            TrendClass::Rising => {
                if period < p.short_period && trend.height_slope.abs() > p.rapid_slope {
                    p.rising_wind_swell
                } else if period >= p.long_period {
                    p.rising_groundswell
                } else {
                    0.0
                }
            }
            TrendClass::Falling => {
                if period >= p.long_period && trend.height_slope.abs() < p.slope_threshold {
                    p.easing_groundswell
                } else {
                    p.falling
                }
            }
            _ => 0.0,
        }
    }

    /// Score with the trend adjustment applied, clamped to [0, 10].
    pub fn apply_trend_adjustment(
        &self,
        score: FloatValue,
        trend: &SwellTrend,
        period: FloatValue,
    ) -> FloatValue {
        (score + self.adjustment(trend, period)).clamp(0.0, 10.0)
    }
}
