//! Site-aware surf forecast components
//!
//! # Module Organisation
//!
//! - `propagation`: buoy-to-beach travel time, swell decay and wind sea
//! - `calibration`: correction factors learned from rated observations,
//!   the bar-state index and rating preferences
//! - `observation`: forecast observations, ratings and the observation log
//! - `quality`: the 0-10 surf quality score
//! - `trends`: swell trend classification and score adjustment
//!
//! # Parameters
//!
//! Each component has an associated parameters struct in the `parameters`
//! module with defaults calibrated for an east-facing beach break.

pub mod calibration;
pub mod observation;
pub mod parameters;
pub mod propagation;
pub mod quality;
pub mod trends;
