//! Propagation Parameters
//!
//! Parameters for carrying buoy measurements to the surf zone: travel time,
//! swell decay and local wind-sea generation.

use serde::{Deserialize, Serialize};
use surfcast_core::timeseries::FloatValue;
use surfcast_core::waves::WaveState;

/// Parameters for the buoy-to-beach propagation model
///
/// # Decay
///
/// Swell loses energy between the buoy and the beach as
///
/// $$H_s(t) = H_{s,0} \, e^{-t/\tau}$$
///
/// # Wind sea
///
/// Local wind waves grow as $H_w = \alpha U^2$ above a generation threshold,
/// are attenuated when the wind is misaligned with the swell, and combine
/// with the swell by energy superposition $H = \sqrt{H_s^2 + H_w^2}$.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationParameters {
    /// Distance from the buoy to the surf zone
    /// unit: km
    /// default: 34.0
    pub buoy_distance_km: FloatValue,

    /// Water depth at the buoy, used for the group speed in travel time
    /// unit: m
    /// default: 25.0
    pub reference_depth: FloatValue,

    /// Swell decay time constant
    /// A non-positive value disables decay
    /// unit: hours
    /// default: 30.0
    pub decay_tau_hours: FloatValue,

    /// Minimum wind speed that generates local wind waves
    /// unit: m/s
    /// default: 3.0
    pub wind_wave_min_speed: FloatValue,

    /// Growth coefficient $\alpha$ in $H_w = \alpha U^2$
    /// unit: s²/m
    /// default: 0.008
    pub wind_wave_coefficient: FloatValue,

    /// Effective fetch the growth coefficient was fitted for
    /// Reported with the forecast; the growth law does not scale with it
    /// unit: km
    /// default: 100.0
    pub fetch_km: FloatValue,

    /// Upper bound on the wind-wave height
    /// unit: m
    /// default: 2.0
    pub wind_wave_max_height: FloatValue,

    /// Wind/swell separation beyond which generation is moderately reduced
    /// unit: degrees
    /// default: 45.0
    pub partial_misalignment: FloatValue,

    /// Attenuation applied beyond `partial_misalignment`
    /// unit: dimensionless
    /// default: 0.6
    pub partial_misalignment_factor: FloatValue,

    /// Wind/swell separation beyond which generation is strongly reduced
    /// unit: degrees
    /// default: 90.0
    pub full_misalignment: FloatValue,

    /// Attenuation applied beyond `full_misalignment`
    /// unit: dimensionless
    /// default: 0.3
    pub full_misalignment_factor: FloatValue,

    /// Offshore state assumed when no buoy data is available
    /// default: 1.5 m, 10 s, from 90°
    pub fallback_state: WaveState,
}

impl Default for PropagationParameters {
    fn default() -> Self {
        Self {
            buoy_distance_km: 34.0,
            reference_depth: 25.0,
            decay_tau_hours: 30.0,
            wind_wave_min_speed: 3.0,
            wind_wave_coefficient: 0.008,
            fetch_km: 100.0,
            wind_wave_max_height: 2.0,
            partial_misalignment: 45.0,
            partial_misalignment_factor: 0.6,
            full_misalignment: 90.0,
            full_misalignment_factor: 0.3,
            fallback_state: WaveState::new(1.5, 10.0, 90.0),
        }
    }
}
