//! Nearshore wave transformation: refraction, shoaling and depth-limited breaking.
//!
//! Offshore conditions are carried across a 1-D cross-shore depth profile using
//! linear wave theory. No currents, directional spreading or 3-D bar features
//! are represented.
//!
//! # Refraction
//!
//! Along a ray over straight, parallel contours Snell's law holds:
//!
//! $$\frac{\sin\theta_1}{c_1} = \frac{\sin\theta_2}{c_2}$$
//!
//! where $\theta$ is measured from the shoreward normal.
//!
//! # Shoaling
//!
//! Without dissipation the shoreward energy flux $E c_g \cos\theta$ is
//! conserved, and with $E \propto H^2$:
//!
//! $$H_2 = H_1 \sqrt{\frac{c_{g1}\cos\theta_1}{c_{g2}\cos\theta_2}} = H_1 K_{sr}$$
//!
//! # Breaking
//!
//! Waves break once $H \geq \gamma_b h$ with breaker index $\gamma_b \approx 0.78$.
//! The reported breaking height is the shoaled height at the first point that
//! satisfies the criterion; no post-break decay is applied.
//!
//! # Breaker type
//!
//! The surf-similarity (Iribarren) number
//!
//! $$\xi = \frac{\tan\beta}{\sqrt{H_0 / L_0}}, \qquad L_0 = \frac{g T^2}{2\pi}$$
//!
//! classifies breakers as spilling ($\xi < 0.4$), plunging ($0.4 \le \xi < 2$)
//! or surging ($\xi \ge 2$).

use crate::dispersion::DispersionSolver;
use crate::timeseries::FloatValue;
use crate::waves::DepthProfile;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Floor applied to both cosines in the energy-flux ratio, near grazing incidence.
const MIN_COSINE: FloatValue = 0.01;
/// Floor applied to the energy-flux ratio.
const MIN_FLUX_RATIO: FloatValue = 0.01;

/// Parameters for the nearshore transformation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformParameters {
    /// Breaker index $\gamma_b$, the height-to-depth ratio at breaking.
    ///
    /// Default: 0.78 (random waves)
    pub breaker_index: FloatValue,
}

impl Default for TransformParameters {
    fn default() -> Self {
        Self {
            breaker_index: 0.78,
        }
    }
}

/// Breaker classification from the surf-similarity number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakerType {
    Spilling,
    Plunging,
    Surging,
}

impl BreakerType {
    pub fn from_surf_similarity(xi: FloatValue) -> Self {
        if xi < 0.4 {
            BreakerType::Spilling
        } else if xi < 2.0 {
            BreakerType::Plunging
        } else {
            BreakerType::Surging
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BreakerType::Spilling => "spilling",
            BreakerType::Plunging => "plunging",
            BreakerType::Surging => "surging",
        }
    }
}

impl fmt::Display for BreakerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BreakerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spilling" => Ok(BreakerType::Spilling),
            "plunging" => Ok(BreakerType::Plunging),
            "surging" => Ok(BreakerType::Surging),
            other => Err(format!("Unknown breaker type: {}", other)),
        }
    }
}

/// Diagnostic record for one profile point visited by the breaking search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShoalingStep {
    /// Distance from shore (m)
    pub distance: FloatValue,
    /// Local depth (m)
    pub depth: FloatValue,
    /// Wave height arriving at this point (m)
    pub height: FloatValue,
    /// Propagation angle from the shoreward normal (rad)
    pub angle: FloatValue,
    /// Phase speed (m/s)
    pub phase_speed: FloatValue,
    /// Group speed (m/s)
    pub group_speed: FloatValue,
    /// Cumulative shoaling-refraction coefficient relative to the offshore height
    pub shoaling_coefficient: FloatValue,
}

impl ShoalingStep {
    pub fn angle_degrees(&self) -> FloatValue {
        self.angle.to_degrees()
    }
}

/// Result of one shoaling-refraction step between two depths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShoalRefraction {
    pub height: FloatValue,
    /// Refracted angle (rad)
    pub angle: FloatValue,
    /// Step coefficient $K_{sr} = H_2 / H_1$
    pub coefficient: FloatValue,
}

/// Where and how the wave breaks along a profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakingPoint {
    /// Breaking height (m)
    pub height: FloatValue,
    /// Depth at breaking (m)
    pub depth: FloatValue,
    /// Distance from shore at breaking (m)
    pub distance: FloatValue,
    /// Angle from the shoreward normal at breaking (rad)
    pub angle: FloatValue,
    /// False when the profile ran out before the breaking criterion was met
    pub breaking: bool,
}

impl BreakingPoint {
    fn none() -> Self {
        Self {
            height: 0.0,
            depth: 0.0,
            distance: 0.0,
            angle: 0.0,
            breaking: false,
        }
    }

    pub fn angle_degrees(&self) -> FloatValue {
        self.angle.to_degrees()
    }
}

/// Terminal output of the transformation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakingResult {
    pub height: FloatValue,
    pub depth: FloatValue,
    pub distance: FloatValue,
    /// Angle from the shoreward normal at breaking (rad)
    pub angle: FloatValue,
    pub surf_similarity: FloatValue,
    pub breaker_type: BreakerType,
}

impl BreakingResult {
    pub fn angle_degrees(&self) -> FloatValue {
        self.angle.to_degrees()
    }
}

/// Breaking result together with the shoaling path that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    pub breaking: BreakingResult,
    /// True when the breaking criterion was met before the shoreline
    pub broke: bool,
    pub path: Vec<ShoalingStep>,
}

/// Carries offshore waves across a depth profile to the breaking point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveProfileTransformer {
    dispersion: DispersionSolver,
    parameters: TransformParameters,
}

impl WaveProfileTransformer {
    pub fn new(dispersion: DispersionSolver, parameters: TransformParameters) -> Self {
        Self {
            dispersion,
            parameters,
        }
    }

    pub fn dispersion(&self) -> &DispersionSolver {
        &self.dispersion
    }

    pub fn breaker_index(&self) -> FloatValue {
        self.parameters.breaker_index
    }

    /// Refracted angle at depth `h2` for a wave at angle `theta1` (rad) at depth `h1`.
    ///
    /// The sine is clamped to [-1, 1] before inversion. If either phase speed
    /// is unresolvable the angle is returned unchanged.
    pub fn refract(
        &self,
        period: FloatValue,
        h1: FloatValue,
        h2: FloatValue,
        theta1: FloatValue,
    ) -> FloatValue {
        let c1 = self.dispersion.phase_speed(period, h1);
        let c2 = self.dispersion.phase_speed(period, h2);
        if c1 <= 0.0 || c2 <= 0.0 {
            return theta1;
        }
        (theta1.sin() * c2 / c1).clamp(-1.0, 1.0).asin()
    }

    /// Carry a wave of height `height` from depth `h1` to depth `h2`.
    ///
    /// If either group speed is unresolvable (zero depth) the height is
    /// carried over unchanged with a unit coefficient.
    pub fn shoal_refract(
        &self,
        height: FloatValue,
        period: FloatValue,
        h1: FloatValue,
        h2: FloatValue,
        theta1: FloatValue,
    ) -> ShoalRefraction {
        let theta2 = self.refract(period, h1, h2, theta1);
        let cg1 = self.dispersion.group_speed(period, h1);
        let cg2 = self.dispersion.group_speed(period, h2);

        if cg1 <= 0.0 || cg2 <= 0.0 {
            return ShoalRefraction {
                height,
                angle: theta2,
                coefficient: 1.0,
            };
        }

        let cos1 = theta1.cos().abs().max(MIN_COSINE);
        let cos2 = theta2.cos().abs().max(MIN_COSINE);
        let ratio = ((cg1 * cos1) / (cg2 * cos2)).max(MIN_FLUX_RATIO);
        let coefficient = ratio.sqrt();

        ShoalRefraction {
            height: height * coefficient,
            angle: theta2,
            coefficient,
        }
    }

    /// Depth-limited breaking test.
    ///
    /// Returns whether `height >= breaker_index * depth` and the height to
    /// report: the current height, or zero on dry points.
    pub fn breaking_check(&self, height: FloatValue, depth: FloatValue) -> (bool, FloatValue) {
        if depth <= 0.0 {
            return (true, 0.0);
        }
        (height >= self.parameters.breaker_index * depth, height)
    }

    /// Step across the profile and return the first breaking point.
    ///
    /// If no point satisfies the criterion the state at the shore-most point
    /// is returned with `breaking == false`. An empty profile yields zeros.
    pub fn find_breaking_point(
        &self,
        offshore_height: FloatValue,
        period: FloatValue,
        offshore_angle: FloatValue,
        profile: &DepthProfile,
    ) -> BreakingPoint {
        self.search(offshore_height, period, offshore_angle, profile, None)
    }

    /// As [`find_breaking_point`](Self::find_breaking_point), also returning
    /// a diagnostic step for every point visited.
    pub fn find_breaking_point_with_path(
        &self,
        offshore_height: FloatValue,
        period: FloatValue,
        offshore_angle: FloatValue,
        profile: &DepthProfile,
    ) -> (BreakingPoint, Vec<ShoalingStep>) {
        let mut path = Vec::with_capacity(profile.len());
        let point = self.search(
            offshore_height,
            period,
            offshore_angle,
            profile,
            Some(&mut path),
        );
        (point, path)
    }

    fn search(
        &self,
        offshore_height: FloatValue,
        period: FloatValue,
        offshore_angle: FloatValue,
        profile: &DepthProfile,
        mut path: Option<&mut Vec<ShoalingStep>>,
    ) -> BreakingPoint {
        let points = profile.points();
        let Some(shore) = points.last() else {
            return BreakingPoint::none();
        };

        let mut height = offshore_height;
        let mut angle = offshore_angle;

        for (i, point) in points.iter().enumerate() {
            if let Some(path) = path.as_deref_mut() {
                let kinematics = self.dispersion.kinematics(period, point.depth);
                path.push(ShoalingStep {
                    distance: point.distance,
                    depth: point.depth,
                    height,
                    angle,
                    phase_speed: kinematics.phase_speed,
                    group_speed: kinematics.group_speed,
                    shoaling_coefficient: if offshore_height > 0.0 {
                        height / offshore_height
                    } else {
                        1.0
                    },
                });
            }

            let (is_breaking, reported) = self.breaking_check(height, point.depth);
            if is_breaking {
                debug!(
                    "Breaking at {:.1} m from shore in {:.2} m depth, H = {:.2} m",
                    point.distance, point.depth, reported
                );
                return BreakingPoint {
                    height: reported,
                    depth: point.depth,
                    distance: point.distance,
                    angle,
                    breaking: true,
                };
            }

            if let Some(next) = points.get(i + 1) {
                let step = self.shoal_refract(height, period, point.depth, next.depth, angle);
                height = step.height;
                angle = step.angle;
            }
        }

        debug!(
            "Profile exhausted without breaking, H = {:.2} m at {:.2} m depth",
            height, shore.depth
        );
        let (_, reported) = self.breaking_check(height, shore.depth);
        BreakingPoint {
            height: reported,
            depth: shore.depth,
            distance: shore.distance,
            angle,
            breaking: false,
        }
    }

    /// Surf-similarity number $\xi$ for a beach slope `beach_slope` (rad).
    ///
    /// Returns 0 for non-positive height or period.
    pub fn surf_similarity(
        &self,
        beach_slope: FloatValue,
        deep_water_height: FloatValue,
        period: FloatValue,
    ) -> FloatValue {
        if period <= 0.0 || deep_water_height <= 0.0 {
            return 0.0;
        }
        let wavelength = self.dispersion.deep_water_wavelength(period);
        if wavelength <= 0.0 {
            return 0.0;
        }
        beach_slope.tan() / (deep_water_height / wavelength).sqrt()
    }

    /// Full transformation: breaking search with path, then breaker classification.
    ///
    /// `offshore_height` is also used as the deep-water height in the
    /// surf-similarity number.
    pub fn transform(
        &self,
        offshore_height: FloatValue,
        period: FloatValue,
        offshore_angle: FloatValue,
        profile: &DepthProfile,
        beach_slope: FloatValue,
    ) -> Transformation {
        let (point, path) =
            self.find_breaking_point_with_path(offshore_height, period, offshore_angle, profile);
        let surf_similarity = self.surf_similarity(beach_slope, offshore_height, period);

        Transformation {
            breaking: BreakingResult {
                height: point.height,
                depth: point.depth,
                distance: point.distance,
                angle: point.angle,
                surf_similarity,
                breaker_type: BreakerType::from_surf_similarity(surf_similarity),
            },
            broke: point.breaking,
            path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waves::ProfilePoint;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn transformer() -> WaveProfileTransformer {
        WaveProfileTransformer::default()
    }

    fn default_profile() -> DepthProfile {
        DepthProfile::from_points(vec![
            ProfilePoint::new(0.0, 0.0),
            ProfilePoint::new(50.0, 1.0),
            ProfilePoint::new(100.0, 2.0),
            ProfilePoint::new(200.0, 3.5),
            ProfilePoint::new(300.0, 5.0),
            ProfilePoint::new(500.0, 7.0),
            ProfilePoint::new(1000.0, 10.0),
            ProfilePoint::new(2000.0, 15.0),
            ProfilePoint::new(5000.0, 20.0),
            ProfilePoint::new(10000.0, 25.0),
        ])
    }

    #[test]
    fn test_refract_same_depth_is_identity() {
        let t = transformer();
        let theta = 0.3;
        assert_abs_diff_eq!(t.refract(10.0, 8.0, 8.0, theta), theta, epsilon = 1e-12);
    }

    #[test]
    fn test_refract_turns_toward_normal_in_shallower_water() {
        let t = transformer();
        let theta1 = 30.0_f64.to_radians();
        let theta2 = t.refract(10.0, 20.0, 3.0, theta1);
        assert!(theta2 > 0.0 && theta2 < theta1);

        let negative = t.refract(10.0, 20.0, 3.0, -theta1);
        assert_abs_diff_eq!(negative, -theta2, epsilon = 1e-12);
    }

    #[test]
    fn test_refract_clamps_total_internal_reflection() {
        let t = transformer();
        // Steep angle moving into deeper water would give sin > 1
        let theta2 = t.refract(10.0, 2.0, 40.0, 80.0_f64.to_radians());
        assert_abs_diff_eq!(theta2, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_refract_unresolvable_depth_keeps_angle() {
        let t = transformer();
        assert_eq!(t.refract(10.0, 5.0, 0.0, 0.4), 0.4);
    }

    #[test]
    fn test_shoal_refract_identity() {
        let t = transformer();
        let step = t.shoal_refract(1.7, 9.0, 6.0, 6.0, 0.0);
        assert_abs_diff_eq!(step.height, 1.7, epsilon = 1e-12);
        assert_abs_diff_eq!(step.angle, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(step.coefficient, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_shoaling_grows_height_in_shallow_water() {
        let t = transformer();
        let step = t.shoal_refract(1.0, 10.0, 20.0, 2.0, 0.0);
        assert!(step.coefficient > 1.0, "Ksr = {}", step.coefficient);
        assert_relative_eq!(step.height, step.coefficient);
    }

    #[test]
    fn test_shoal_refract_to_dry_point_keeps_height() {
        let t = transformer();
        let step = t.shoal_refract(1.2, 10.0, 1.0, 0.0, 0.1);
        assert_eq!(step.height, 1.2);
        assert_eq!(step.coefficient, 1.0);
        assert_eq!(step.angle, 0.1);
    }

    #[test]
    fn test_breaking_check() {
        let t = transformer();
        assert_eq!(t.breaking_check(1.0, 2.0), (false, 1.0));
        assert_eq!(t.breaking_check(0.78 * 2.0, 2.0), (true, 0.78 * 2.0));
        assert_eq!(t.breaking_check(2.5, 2.0), (true, 2.5));
        assert_eq!(t.breaking_check(1.0, 0.0), (true, 0.0));
    }

    #[test]
    fn test_breaking_point_on_monotonic_profile() {
        let t = transformer();
        let profile = default_profile();
        let theta = 20.0_f64.to_radians();
        let (point, path) = t.find_breaking_point_with_path(1.5, 8.0, theta, &profile);

        assert!(point.breaking);
        assert!(point.height >= 0.78 * point.depth);
        assert!(point.distance >= 0.0 && point.distance <= 10000.0);
        assert!(point.depth > 0.0, "Should break before the dry shoreline");

        // Exactly one breaking point: every step before the last is unbroken
        let (last, earlier) = path.split_last().unwrap();
        assert_eq!(last.distance, point.distance);
        for step in earlier {
            assert!(step.height < 0.78 * step.depth);
        }

        // Refraction turns the crest toward the shore normal
        assert!(point.angle.abs() < theta);
    }

    #[test]
    fn test_path_starts_offshore_with_unit_coefficient() {
        let t = transformer();
        let (_, path) = t.find_breaking_point_with_path(1.0, 10.0, 0.0, &default_profile());
        let first = path.first().unwrap();
        assert_eq!(first.distance, 10000.0);
        assert_eq!(first.height, 1.0);
        assert_eq!(first.shoaling_coefficient, 1.0);
        assert!(first.group_speed > 0.0 && first.phase_speed > first.group_speed);
    }

    #[test]
    fn test_path_and_plain_search_agree() {
        let t = transformer();
        let profile = default_profile();
        let plain = t.find_breaking_point(2.0, 11.0, 0.2, &profile);
        let (with_path, _) = t.find_breaking_point_with_path(2.0, 11.0, 0.2, &profile);
        assert_eq!(plain, with_path);
    }

    #[test]
    fn test_exhausted_profile_returns_shore_point() {
        let t = transformer();
        let profile = DepthProfile::from_points(vec![
            ProfilePoint::new(500.0, 12.0),
            ProfilePoint::new(100.0, 8.0),
            ProfilePoint::new(20.0, 6.0),
        ]);
        let point = t.find_breaking_point(0.3, 8.0, 0.0, &profile);
        assert!(!point.breaking);
        assert_eq!(point.distance, 20.0);
        assert_eq!(point.depth, 6.0);
        assert!(point.height > 0.3);
    }

    #[test]
    fn test_empty_profile() {
        let t = transformer();
        let (point, path) = t.find_breaking_point_with_path(1.0, 8.0, 0.0, &DepthProfile::default());
        assert_eq!(point.height, 0.0);
        assert_eq!(point.depth, 0.0);
        assert!(!point.breaking);
        assert!(path.is_empty());
    }

    #[test]
    fn test_surf_similarity_value() {
        let t = transformer();
        let slope = 0.1_f64.atan();
        let l0 = 9.81 * 100.0 / (2.0 * std::f64::consts::PI);
        let expected = 0.1 / (1.0 / l0).sqrt();
        assert_relative_eq!(t.surf_similarity(slope, 1.0, 10.0), expected, max_relative = 1e-12);
        assert_eq!(t.surf_similarity(slope, 0.0, 10.0), 0.0);
        assert_eq!(t.surf_similarity(slope, 1.0, 0.0), 0.0);
    }

    #[test]
    fn test_breaker_classification_boundaries() {
        assert_eq!(BreakerType::from_surf_similarity(0.39), BreakerType::Spilling);
        assert_eq!(BreakerType::from_surf_similarity(0.40), BreakerType::Plunging);
        assert_eq!(BreakerType::from_surf_similarity(1.99), BreakerType::Plunging);
        assert_eq!(BreakerType::from_surf_similarity(2.00), BreakerType::Surging);
    }

    #[test]
    fn test_breaker_type_parsing() {
        assert_eq!("Plunging".parse::<BreakerType>(), Ok(BreakerType::Plunging));
        assert_eq!(BreakerType::Surging.to_string(), "surging");
        assert!("closeout".parse::<BreakerType>().is_err());
    }

    #[test]
    fn test_transform_classifies_breaker() {
        let t = transformer();
        let result = t.transform(1.5, 8.0, 0.2, &default_profile(), 6.5_f64.to_radians());
        assert!(result.broke);
        assert_eq!(
            result.breaking.breaker_type,
            BreakerType::from_surf_similarity(result.breaking.surf_similarity)
        );
        assert_eq!(result.path.last().unwrap().distance, result.breaking.distance);
    }
}
