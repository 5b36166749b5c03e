//! Core wave physics for nearshore surf forecasting.
//!
//! This crate holds the site-independent numerics:
//! - `dispersion`: linear dispersion relation, phase and group speed
//! - `transform`: refraction, shoaling and depth-limited breaking along a profile
//! - `timeseries`: historical offshore buoy measurements
//! - `waves`: wave state and depth profile data model
//!
//! Site-aware components (propagation, calibration, scoring) live in
//! `surfcast-components`.

pub mod dispersion;
pub mod interpolate;
pub mod timeseries;
pub mod transform;
pub mod units;
pub mod utils;
pub mod waves;

pub mod errors;
