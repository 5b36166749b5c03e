//! Linear wave theory: dispersion relation, phase speed and group speed.
//!
//! Surface gravity waves of angular frequency $\omega = 2\pi / T$ in water of
//! depth $h$ satisfy the linear dispersion relation
//!
//! $$\omega^2 = g k \tanh(k h)$$
//!
//! which has no closed form for the wavenumber $k$ at finite depth. The solver
//! uses Newton-Raphson iteration seeded with the deep-water wavenumber
//! $k_0 = \omega^2 / g$.
//!
//! Limits:
//! - Deep water ($kh \gg 1$): $\tanh(kh) \to 1$, so $k \to \omega^2 / g$ and
//!   $c_g \to c / 2$.
//! - Shallow water ($kh \ll 1$): $\tanh(kh) \to kh$, so
//!   $c \to c_g \to \sqrt{g h}$, independent of period.

use crate::timeseries::FloatValue;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Numerical and physical constants for the dispersion solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispersionParameters {
    /// Gravitational acceleration (m/s²).
    /// Default: 9.81
    pub gravity: FloatValue,

    /// Depth beyond which water is treated as infinitely deep (m).
    /// Default: 1000.0
    pub deep_water_depth: FloatValue,

    /// Convergence tolerance on both the residual and the step size.
    /// Default: 1e-6
    pub tolerance: FloatValue,

    /// Newton-Raphson iteration limit.
    /// Default: 100
    pub max_iterations: usize,
}

impl Default for DispersionParameters {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            deep_water_depth: 1000.0,
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

/// Kinematics of a linear wave at one depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveKinematics {
    /// Wavenumber (1/m)
    pub wavenumber: FloatValue,
    /// Phase speed (m/s)
    pub phase_speed: FloatValue,
    /// Group speed (m/s)
    pub group_speed: FloatValue,
}

/// Solver for the linear dispersion relation.
///
/// Invalid input (non-positive period or depth) yields a zero wavenumber and
/// zero speeds rather than an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispersionSolver {
    parameters: DispersionParameters,
}

impl DispersionSolver {
    pub fn from_parameters(parameters: DispersionParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &DispersionParameters {
        &self.parameters
    }

    pub fn gravity(&self) -> FloatValue {
        self.parameters.gravity
    }

    /// Angular frequency $\omega = 2\pi / T$ (rad/s), zero for non-positive periods.
    pub fn angular_frequency(&self, period: FloatValue) -> FloatValue {
        if period <= 0.0 {
            0.0
        } else {
            2.0 * PI / period
        }
    }

    /// Deep-water wavelength $L_0 = g T^2 / 2\pi$ (m).
    pub fn deep_water_wavelength(&self, period: FloatValue) -> FloatValue {
        if period <= 0.0 {
            0.0
        } else {
            self.parameters.gravity * period * period / (2.0 * PI)
        }
    }

    /// Solve $\omega^2 = g k \tanh(kh)$ for the wavenumber $k$ (1/m).
    ///
    /// Iteration stops when the residual or the step falls below the
    /// tolerance, when the derivative is too small to divide by, or after the
    /// iteration limit. A trial value that goes non-positive is reset to the
    /// deep-water seed. Non-convergence returns the latest estimate.
    pub fn wavenumber(&self, period: FloatValue, depth: FloatValue) -> FloatValue {
        if period <= 0.0 || depth <= 0.0 {
            return 0.0;
        }

        let g = self.parameters.gravity;
        let tol = self.parameters.tolerance;
        let omega = self.angular_frequency(period);
        let omega_sq = omega * omega;
        let k0 = omega_sq / g;

        if depth > self.parameters.deep_water_depth {
            return k0;
        }

        let residual = |k: FloatValue| omega_sq - g * k * (k * depth).tanh();
        // d/dk [g k tanh(kh)] = g tanh(kh) + g k h sech^2(kh)
        let derivative = |k: FloatValue| {
            let kh = k * depth;
            let sech = 1.0 / kh.cosh();
            -g * kh.tanh() - g * kh * sech * sech
        };

        let mut k = k0;
        for _ in 0..self.parameters.max_iterations {
            let f = residual(k);
            if f.abs() < tol {
                break;
            }

            let df = derivative(k);
            if df.abs() < 1e-10 {
                break;
            }

            let mut k_new = k - f / df;
            if k_new <= 0.0 {
                k_new = k0;
            }

            if (k_new - k).abs() < tol {
                k = k_new;
                break;
            }
            k = k_new;
        }
        k
    }

    /// Phase speed $c = \omega / k$ (m/s).
    pub fn phase_speed(&self, period: FloatValue, depth: FloatValue) -> FloatValue {
        let k = self.wavenumber(period, depth);
        if k <= 0.0 {
            return 0.0;
        }
        self.angular_frequency(period) / k
    }

    /// Group speed (m/s).
    ///
    /// $$c_g = \frac{c}{2}\left(1 + \frac{2kh}{\sinh 2kh}\right)$$
    ///
    /// with $c_g = c/2$ for $kh > 10$ and $c_g = c$ for $kh < 0.1$, which keeps
    /// $\sinh$ away from overflow and the ratio away from 0/0.
    pub fn group_speed(&self, period: FloatValue, depth: FloatValue) -> FloatValue {
        self.kinematics(period, depth).group_speed
    }

    /// Wavenumber, phase speed and group speed from a single solve.
    pub fn kinematics(&self, period: FloatValue, depth: FloatValue) -> WaveKinematics {
        let k = self.wavenumber(period, depth);
        if k <= 0.0 {
            return WaveKinematics {
                wavenumber: 0.0,
                phase_speed: 0.0,
                group_speed: 0.0,
            };
        }

        let c = self.angular_frequency(period) / k;
        let kh = k * depth;
        let cg = if kh > 10.0 {
            0.5 * c
        } else if kh < 0.1 {
            c
        } else {
            let sinh_2kh = (2.0 * kh).sinh();
            if sinh_2kh > 0.0 {
                0.5 * c * (1.0 + 2.0 * kh / sinh_2kh)
            } else {
                c
            }
        };

        WaveKinematics {
            wavenumber: k,
            phase_speed: c,
            group_speed: cg,
        }
    }
}
