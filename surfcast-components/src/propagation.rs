//! Buoy-to-beach propagation
//!
//! Forecasts offshore conditions at the surf zone from historical buoy
//! measurements.
//!
//! # What This Component Does
//!
//! 1. Reads the buoy series at the reference time (linear interpolation for
//!    height and period, circular interpolation for direction).
//! 2. Computes the travel time from buoy to beach at the group speed of the
//!    peak period in the buoy's water depth:
//!    $$t = \frac{d}{c_g(T, h_{ref})}$$
//! 3. Decays the swell over that travel time:
//!    $$H_s(t) = H_{s,0} \, e^{-t/\tau}$$
//! 4. Adds local wind sea by energy superposition:
//!    $$H = \sqrt{H_s^2 + H_w^2}$$
//!
//! # Simplifications
//!
//! - The series is read at the reference time, not at the reference time
//!   minus the travel time. The travel time only sets the decay. Reading
//!   further back picked up stale swell that had already passed the beach.
//! - Period and direction are carried unchanged from the buoy.
//! - Wind-wave growth uses a single quadratic law fitted for a fixed fetch
//!   rather than a full fetch and duration limited growth curve.

use crate::parameters::PropagationParameters;
use log::warn;
use serde::{Deserialize, Serialize};
use surfcast_core::dispersion::DispersionSolver;
use surfcast_core::timeseries::{BuoySeries, FloatValue, Time};
use surfcast_core::units::{angle_between, km_to_metres, SECONDS_PER_HOUR};
use surfcast_core::waves::WaveState;

/// Wind at the surf zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindConditions {
    /// Wind speed (m/s)
    pub speed: FloatValue,
    /// Coming-from direction (degrees)
    pub direction: FloatValue,
}

impl WindConditions {
    pub fn new(speed: FloatValue, direction: FloatValue) -> Self {
        Self { speed, direction }
    }
}

/// Swell combined with the local wind sea.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindWaveCombination {
    /// Combined significant height (m)
    pub total_height: FloatValue,
    /// Wind-sea height on its own (m)
    pub wind_wave_height: FloatValue,
}

/// Forecast offshore state at the surf zone with its breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropagationForecast {
    /// Forecast offshore state; height includes the wind sea
    pub state: WaveState,
    pub target_time: Time,
    /// Buoy-to-beach travel time (hours)
    pub travel_time_hours: FloatValue,
    /// Swell height after decay (m)
    pub swell_height: FloatValue,
    /// Wind-sea height (m)
    pub wind_wave_height: FloatValue,
    /// $e^{-t/\tau}$ applied to the swell
    pub decay_factor: FloatValue,
    /// Wind-sea share of the total wave energy (%)
    pub wind_energy_share: FloatValue,
    /// Effective fetch the wind-sea growth was fitted for (km)
    pub fetch_km: FloatValue,
    /// True when the buoy series was empty and the fallback state was used
    pub used_fallback: bool,
}

/// Propagates buoy conditions to the surf zone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropagationForecaster {
    parameters: PropagationParameters,
    dispersion: DispersionSolver,
}

impl PropagationForecaster {
    pub fn from_parameters(parameters: PropagationParameters, dispersion: DispersionSolver) -> Self {
        Self {
            parameters,
            dispersion,
        }
    }

    pub fn parameters(&self) -> &PropagationParameters {
        &self.parameters
    }

    /// Hours for energy at `period` to cover `distance_km` in water of `depth`.
    ///
    /// Returns 0 when the period is non-positive or the group speed cannot be resolved.
    pub fn travel_time_hours(
        &self,
        distance_km: FloatValue,
        period: FloatValue,
        depth: FloatValue,
    ) -> FloatValue {
        if period <= 0.0 {
            return 0.0;
        }
        let cg = self.dispersion.group_speed(period, depth);
        if cg <= 0.0 {
            return 0.0;
        }
        km_to_metres(distance_km) / cg / SECONDS_PER_HOUR
    }

    /// Multiplier $e^{-t/\tau}$, or 1 when decay is disabled.
    pub fn decay_factor(&self, hours: FloatValue) -> FloatValue {
        let tau = self.parameters.decay_tau_hours;
        if tau <= 0.0 {
            1.0
        } else {
            (-hours / tau).exp()
        }
    }

    /// Swell height after `hours` of exponential decay, floored at zero.
    pub fn decay(&self, height: FloatValue, hours: FloatValue) -> FloatValue {
        (height * self.decay_factor(hours)).max(0.0)
    }

    /// Combine the swell with wind sea generated by the local wind.
    pub fn wind_wave_component(
        &self,
        swell_height: FloatValue,
        wind_speed: FloatValue,
        wind_direction: FloatValue,
        swell_direction: FloatValue,
    ) -> WindWaveCombination {
        let p = &self.parameters;
        if wind_speed < p.wind_wave_min_speed {
            return WindWaveCombination {
                total_height: swell_height,
                wind_wave_height: 0.0,
            };
        }

        let separation = angle_between(wind_direction, swell_direction);
        let alignment = if separation > p.full_misalignment {
            p.full_misalignment_factor
        } else if separation > p.partial_misalignment {
            p.partial_misalignment_factor
        } else {
            1.0
        };

        let wind_wave_height =
            (p.wind_wave_coefficient * wind_speed * wind_speed * alignment).min(p.wind_wave_max_height);

        WindWaveCombination {
            total_height: swell_height.hypot(wind_wave_height),
            wind_wave_height,
        }
    }

    /// Offshore conditions at the surf zone for `target_time`.
    ///
    /// An empty series falls back to the configured default state. Without
    /// `wind` no wind sea is added.
    pub fn forecast(
        &self,
        series: &BuoySeries,
        target_time: Time,
        wind: Option<WindConditions>,
    ) -> PropagationForecast {
        let (initial, used_fallback) = match series.at(target_time) {
            Some(state) => (state, false),
            None => {
                warn!(
                    "No buoy data available for {}, using fallback offshore state",
                    target_time
                );
                (self.parameters.fallback_state, true)
            }
        };

        let travel_time_hours = self.travel_time_hours(
            self.parameters.buoy_distance_km,
            initial.period,
            self.parameters.reference_depth,
        );
        let decay_factor = self.decay_factor(travel_time_hours);
        let swell_height = self.decay(initial.height, travel_time_hours);

        let combined = match wind {
            Some(w) => self.wind_wave_component(swell_height, w.speed, w.direction, initial.direction),
            None => WindWaveCombination {
                total_height: swell_height,
                wind_wave_height: 0.0,
            },
        };

        let total_energy = combined.total_height * combined.total_height;
        let wind_energy_share = if total_energy > 0.0 {
            100.0 * combined.wind_wave_height * combined.wind_wave_height / total_energy
        } else {
            0.0
        };

        PropagationForecast {
            state: initial.with_height(combined.total_height),
            target_time,
            travel_time_hours,
            swell_height,
            wind_wave_height: combined.wind_wave_height,
            decay_factor,
            wind_energy_share,
            fetch_km: self.parameters.fetch_km,
            used_fallback,
        }
    }
}
