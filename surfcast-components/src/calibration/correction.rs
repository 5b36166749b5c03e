//! Direction and period binned correction factors.

use serde::{Deserialize, Serialize};
use surfcast_core::timeseries::FloatValue;
use surfcast_core::units::wrap_direction;
use surfcast_core::utils::statistics::mean;

/// Half-open interval `[lower, upper)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinRange {
    pub lower: FloatValue,
    pub upper: FloatValue,
}

impl BinRange {
    pub fn new(lower: FloatValue, upper: FloatValue) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, value: FloatValue) -> bool {
        value >= self.lower && value < self.upper
    }

    /// Consecutive pairs of `edges` as ranges.
    pub fn from_edges(edges: &[FloatValue]) -> Vec<BinRange> {
        edges
            .windows(2)
            .map(|pair| BinRange::new(pair[0], pair[1]))
            .collect()
    }
}

/// Learned correction for one (direction, period) bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectionBin {
    /// Coming-from direction range (degrees)
    pub direction: BinRange,
    /// Peak period range (s)
    pub period: BinRange,
    /// Multiplier on the offshore height
    pub factor: FloatValue,
    /// Rated observations the factor was learned from
    pub samples: usize,
}

impl CorrectionBin {
    pub fn contains(&self, direction: FloatValue, period: FloatValue) -> bool {
        self.direction.contains(wrap_direction(direction)) && self.period.contains(period)
    }
}

/// Correction factors in the order they were learned.
///
/// Lookup returns the first bin containing the point. Bins learned from
/// ascending edges never overlap, so the order only matters for bins
/// inserted by hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrectionFactors {
    bins: Vec<CorrectionBin>,
}

impl CorrectionFactors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bins(bins: Vec<CorrectionBin>) -> Self {
        Self { bins }
    }

    pub fn push(&mut self, bin: CorrectionBin) {
        self.bins.push(bin);
    }

    pub fn bins(&self) -> &[CorrectionBin] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Factor for a swell, 1 when no bin matches.
    pub fn factor_for(&self, direction: FloatValue, period: FloatValue) -> FloatValue {
        self.bins
            .iter()
            .find(|bin| bin.contains(direction, period))
            .map_or(1.0, |bin| bin.factor)
    }

    pub fn apply(&self, height: FloatValue, direction: FloatValue, period: FloatValue) -> FloatValue {
        height * self.factor_for(direction, period)
    }

    /// Unweighted mean of all factors, `None` when empty.
    pub fn mean_factor(&self) -> Option<FloatValue> {
        let factors: Vec<FloatValue> = self.bins.iter().map(|b| b.factor).collect();
        mean(&factors)
    }
}
