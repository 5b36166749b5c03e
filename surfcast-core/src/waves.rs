//! Wave and bathymetry data model.

use crate::timeseries::FloatValue;
use log::warn;
use serde::{Deserialize, Serialize};

/// Bulk description of a sea state at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveState {
    /// Significant wave height (m)
    pub height: FloatValue,
    /// Peak period (s)
    pub period: FloatValue,
    /// Coming-from direction (degrees clockwise from north)
    pub direction: FloatValue,
}

impl WaveState {
    pub fn new(height: FloatValue, period: FloatValue, direction: FloatValue) -> Self {
        Self {
            height,
            period,
            direction,
        }
    }

    /// Same state with a different height.
    pub fn with_height(&self, height: FloatValue) -> Self {
        Self { height, ..*self }
    }
}

/// One point of a cross-shore depth profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    /// Distance from the shoreline (m)
    pub distance: FloatValue,
    /// Still-water depth (m), never negative
    pub depth: FloatValue,
}

impl ProfilePoint {
    pub fn new(distance: FloatValue, depth: FloatValue) -> Self {
        Self { distance, depth }
    }
}

/// Cross-shore depth profile ordered from the offshore end to the shoreline.
///
/// The breaking search walks the points in storage order, so the first point
/// must be the offshore-most one. [`DepthProfile::from_points`] sorts any
/// input into that order; [`DepthProfile::new`] keeps the order it is given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepthProfile {
    points: Vec<ProfilePoint>,
}

impl DepthProfile {
    /// Profile from points already ordered offshore to shore.
    ///
    /// Depths are clamped at zero. A warning is logged when the distances do
    /// not decrease monotonically, since the breaking search is then undefined.
    pub fn new(points: Vec<ProfilePoint>) -> Self {
        let profile = Self {
            points: points
                .into_iter()
                .map(|p| ProfilePoint::new(p.distance, p.depth.max(0.0)))
                .collect(),
        };
        if !profile.is_shoreward() {
            warn!("Depth profile is not ordered offshore to shore");
        }
        profile
    }

    /// Profile from points in any order, sorted by decreasing distance from shore.
    pub fn from_points(mut points: Vec<ProfilePoint>) -> Self {
        points.sort_by(|a, b| b.distance.total_cmp(&a.distance));
        Self::new(points)
    }

    pub fn points(&self) -> &[ProfilePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Offshore-most point.
    pub fn offshore(&self) -> Option<&ProfilePoint> {
        self.points.first()
    }

    /// Shore-most point.
    pub fn shore(&self) -> Option<&ProfilePoint> {
        self.points.last()
    }

    /// Whether distances strictly decrease along the profile.
    pub fn is_shoreward(&self) -> bool {
        self.points
            .windows(2)
            .all(|pair| pair[1].distance < pair[0].distance)
    }

    /// Profile with the tide level added to every depth (clamped at zero).
    pub fn with_tide(&self, tide_level: FloatValue) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| ProfilePoint::new(p.distance, (p.depth + tide_level).max(0.0)))
                .collect(),
        }
    }
}
