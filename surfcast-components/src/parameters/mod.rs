//! Component parameters
//!
//! Each component has a parameter struct here. Every struct deserializes
//! with `#[serde(default)]`, so a partial document only needs the values it
//! overrides.

mod calibration;
mod propagation;
mod scoring;
mod trend;

pub use calibration::CalibrationParameters;
pub use propagation::PropagationParameters;
pub use scoring::{BreakerMultipliers, DirectionSector, ScoreWeights, ScoringParameters};
pub use trend::TrendParameters;
