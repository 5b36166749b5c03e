//! Forecast observations and human ratings.
//!
//! Each forecast hour produces an [`Observation`] recording the offshore
//! state, local conditions and what the model predicted. A surfer can later
//! attach a [`Rating`]; rated observations drive the site calibration.

use crate::quality::QualityScore;
use chrono::Duration;
use log::info;
use serde::{Deserialize, Serialize};
use surfcast_core::errors::{SurfError, SurfResult};
use surfcast_core::timeseries::{FloatValue, Time};
use surfcast_core::transform::BreakerType;
use surfcast_core::waves::WaveState;

/// Wind and tide at the beach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalConditions {
    /// Wind speed (m/s)
    pub wind_speed: FloatValue,
    /// Wind coming-from direction (degrees)
    pub wind_direction: FloatValue,
    /// Tide level (m)
    pub tide: FloatValue,
}

/// What the model predicted for an hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPrediction {
    /// Breaking significant height (m)
    pub breaking_height: FloatValue,
    /// Breaking angle from the shore normal (degrees)
    pub breaking_angle: FloatValue,
    pub breaker_type: Option<BreakerType>,
    /// Final score including any trend adjustment
    pub surf_score: FloatValue,
    pub quality: QualityScore,
}

/// A surfer's rating of an hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// 0 to 10
    pub value: FloatValue,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Breaking height the rater saw (m), if they reported one
    #[serde(default)]
    pub observed_height: Option<FloatValue>,
}

impl Rating {
    pub fn new(value: FloatValue) -> SurfResult<Self> {
        if !(0.0..=10.0).contains(&value) {
            return Err(SurfError::InvalidRating(value));
        }
        Ok(Self {
            value,
            tags: Vec::new(),
            observed_height: None,
        })
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_observed_height(mut self, height: FloatValue) -> Self {
        self.observed_height = Some(height);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: Time,
    pub offshore: WaveState,
    pub local: LocalConditions,
    pub model: ModelPrediction,
    #[serde(default)]
    pub rating: Option<Rating>,
}

impl Observation {
    pub fn new(
        timestamp: Time,
        offshore: WaveState,
        local: LocalConditions,
        model: ModelPrediction,
    ) -> Self {
        Self {
            timestamp,
            offshore,
            local,
            model,
            rating: None,
        }
    }

    pub fn is_rated(&self) -> bool {
        self.rating.is_some()
    }

    /// Attach a rating. An observation can only be rated once.
    pub fn rate(&mut self, rating: Rating) -> SurfResult<()> {
        if self.rating.is_some() {
            return Err(SurfError::AlreadyRated(self.timestamp));
        }
        if !(0.0..=10.0).contains(&rating.value) {
            return Err(SurfError::InvalidRating(rating.value));
        }
        self.rating = Some(rating);
        Ok(())
    }

    /// Breaking height reported by the rater, or the model's when none was reported.
    pub fn observed_breaking_height(&self) -> FloatValue {
        self.rating
            .as_ref()
            .and_then(|r| r.observed_height)
            .unwrap_or(self.model.breaking_height)
    }
}

/// How much rated data the calibration has to work with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalibrationQuality {
    None,
    Poor,
    Fair,
    Good,
}

impl CalibrationQuality {
    pub fn from_rated_count(count: usize) -> Self {
        if count >= 50 {
            CalibrationQuality::Good
        } else if count >= 20 {
            CalibrationQuality::Fair
        } else if count >= 5 {
            CalibrationQuality::Poor
        } else {
            CalibrationQuality::None
        }
    }
}

/// Chronological log of observations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObservationLog {
    observations: Vec<Observation>,
}

impl ObservationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from observations, which must be strictly increasing in time.
    pub fn from_observations(observations: Vec<Observation>) -> SurfResult<Self> {
        let mut log = Self::new();
        for observation in observations {
            log.record(observation)?;
        }
        Ok(log)
    }

    /// Append an observation later than every recorded one.
    pub fn record(&mut self, observation: Observation) -> SurfResult<()> {
        if let Some(last) = self.observations.last() {
            if observation.timestamp <= last.timestamp {
                return Err(SurfError::NonIncreasingTime {
                    index: self.observations.len(),
                    previous: last.timestamp,
                    current: observation.timestamp,
                });
            }
        }
        self.observations.push(observation);
        Ok(())
    }

    /// Rate the observation closest to `timestamp`, strictly within `window`.
    pub fn attach_rating(
        &mut self,
        timestamp: Time,
        rating: Rating,
        window: Duration,
    ) -> SurfResult<&Observation> {
        let closest = self
            .observations
            .iter()
            .enumerate()
            .map(|(i, o)| {
                let offset = o.timestamp - timestamp;
                (i, if offset < Duration::zero() { -offset } else { offset })
            })
            .filter(|(_, distance)| *distance < window)
            .min_by_key(|(_, distance)| *distance)
            .map(|(i, _)| i);

        let Some(index) = closest else {
            return Err(SurfError::ObservationNotFound {
                timestamp,
                window_minutes: window.num_minutes(),
            });
        };

        self.observations[index].rate(rating)?;
        info!(
            "Rated observation at {} ({} rated in total)",
            self.observations[index].timestamp,
            self.rated_count()
        );
        Ok(&self.observations[index])
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn rated(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter().filter(|o| o.is_rated())
    }

    pub fn rated_count(&self) -> usize {
        self.rated().count()
    }

    pub fn calibration_quality(&self) -> CalibrationQuality {
        CalibrationQuality::from_rated_count(self.rated_count())
    }
}
