//! Site configuration
//!
//! A [`SiteConfig`] gathers the geometry of one surf break together with the
//! parameters of every component. It can be written as TOML:
//!
//! ```toml
//! name = "16th Avenue"
//! shore_normal = 110.0
//! beach_slope_degrees = 6.5
//!
//! [[profile]]
//! distance = 0.0
//! depth = 0.0
//!
//! [[profile]]
//! distance = 500.0
//! depth = 7.0
//!
//! [propagation]
//! buoy_distance_km = 34.0
//! ```
//!
//! Any field left out takes its default.

use serde::{Deserialize, Serialize};
use std::path::Path;
use surfcast_components::parameters::{
    CalibrationParameters, PropagationParameters, ScoringParameters, TrendParameters,
};
use surfcast_core::dispersion::DispersionParameters;
use surfcast_core::errors::{SurfError, SurfResult};
use surfcast_core::timeseries::FloatValue;
use surfcast_core::transform::TransformParameters;
use surfcast_core::waves::{DepthProfile, ProfilePoint};

/// Geometry and model parameters for one surf break.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// default: "unnamed"
    pub name: String,

    /// Azimuth of the shore normal pointing offshore
    /// unit: degrees
    /// default: 110.0
    pub shore_normal: FloatValue,

    /// Beach face slope used for the surf-similarity number
    /// unit: degrees
    /// default: 6.5
    pub beach_slope_degrees: FloatValue,

    /// Breaking significant height divided by this gives the surf height that is scored
    /// default: 1.6
    pub surf_height_ratio: FloatValue,

    /// Cross-shore depth profile at mean tide, in any order
    pub profile: Vec<ProfilePoint>,

    pub dispersion: DispersionParameters,
    pub transform: TransformParameters,
    pub propagation: PropagationParameters,
    pub calibration: CalibrationParameters,
    pub scoring: ScoringParameters,
    pub trend: TrendParameters,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "unnamed".to_string(),
            shore_normal: 110.0,
            beach_slope_degrees: 6.5,
            surf_height_ratio: 1.6,
            profile: default_profile(),
            dispersion: DispersionParameters::default(),
            transform: TransformParameters::default(),
            propagation: PropagationParameters::default(),
            calibration: CalibrationParameters::default(),
            scoring: ScoringParameters::default(),
            trend: TrendParameters::default(),
        }
    }
}

/// Steadily deepening beach profile out to 10 km.
pub fn default_profile() -> Vec<ProfilePoint> {
    [
        (0.0, 0.0),
        (50.0, 1.0),
        (100.0, 2.0),
        (200.0, 3.5),
        (300.0, 5.0),
        (500.0, 7.0),
        (1000.0, 10.0),
        (2000.0, 15.0),
        (5000.0, 20.0),
        (10000.0, 25.0),
    ]
    .into_iter()
    .map(|(distance, depth)| ProfilePoint::new(distance, depth))
    .collect()
}

impl SiteConfig {
    pub fn from_toml_str(contents: &str) -> SurfResult<Self> {
        let config: SiteConfig =
            toml::from_str(contents).map_err(|e| SurfError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> SurfResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> SurfResult<String> {
        toml::to_string(self).map_err(|e| SurfError::Config(e.to_string()))
    }

    pub fn validate(&self) -> SurfResult<()> {
        if self.profile.is_empty() {
            return Err(SurfError::Config("depth profile is empty".to_string()));
        }
        if let Some(p) = self
            .profile
            .iter()
            .find(|p| !p.distance.is_finite() || !p.depth.is_finite())
        {
            return Err(SurfError::Config(format!(
                "profile point ({}, {}) is not finite",
                p.distance, p.depth
            )));
        }
        if self.surf_height_ratio <= 0.0 {
            return Err(SurfError::Config(format!(
                "surf_height_ratio must be positive, got {}",
                self.surf_height_ratio
            )));
        }
        if self.transform.breaker_index <= 0.0 {
            return Err(SurfError::Config(format!(
                "breaker_index must be positive, got {}",
                self.transform.breaker_index
            )));
        }
        self.calibration.validate()
    }

    /// Profile ordered offshore to shore.
    pub fn depth_profile(&self) -> DepthProfile {
        DepthProfile::from_points(self.profile.clone())
    }

    /// Beach slope in radians.
    pub fn beach_slope(&self) -> FloatValue {
        self.beach_slope_degrees.to_radians()
    }
}
