//! Hour-by-hour surf forecast for one site.
//!
//! Each forecast hour runs the full chain:
//!
//! 1. propagate the buoy reading to the surf zone (decay plus local wind sea)
//! 2. apply the site correction factor for the swell's direction and period
//! 3. express the swell direction relative to the shore normal
//! 4. shift the depth profile by the tide
//! 5. shoal and refract along the profile until the wave breaks
//! 6. score the surf height and nudge the score by the swell trend
//!
//! Hours are processed strictly in order; the swell trend is computed once per
//! request.

use crate::config::SiteConfig;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use surfcast_components::calibration::{
    CalibrationStatus, CorrectionFactors, SiteCalibrationEngine,
};
use surfcast_components::observation::{
    LocalConditions, ModelPrediction, Observation, ObservationLog,
};
use surfcast_components::propagation::{
    PropagationForecast, PropagationForecaster, WindConditions,
};
use surfcast_components::quality::{QualityScore, QualityScorer, SurfConditions};
use surfcast_components::trends::{SwellTrend, TrendAnalyzer};
use surfcast_core::dispersion::DispersionSolver;
use surfcast_core::errors::{SurfError, SurfResult};
use surfcast_core::timeseries::{BuoySeries, FloatValue, Time};
use surfcast_core::transform::{BreakingResult, ShoalingStep, WaveProfileTransformer};
use surfcast_core::units::angle_to_shore_normal;
use surfcast_core::waves::{DepthProfile, WaveState};

/// Local conditions expected at the break for one forecast hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyConditions {
    pub time: Time,
    pub wind: WindConditions,
    /// Tide level relative to the profile datum (m)
    pub tide: FloatValue,
}

impl HourlyConditions {
    pub fn new(time: Time, wind: WindConditions, tide: FloatValue) -> Self {
        Self { time, wind, tide }
    }
}

/// Everything one forecast run consumes.
#[derive(Debug, Clone)]
pub struct ForecastRequest {
    pub series: BuoySeries,
    /// Time the buoy series is read at
    pub reference_time: Time,
    pub hours: Vec<HourlyConditions>,
    pub correction_factors: CorrectionFactors,
    pub bar_state_index: FloatValue,
}

impl ForecastRequest {
    /// Request with no learned corrections and a neutral bar state.
    pub fn new(series: BuoySeries, reference_time: Time, hours: Vec<HourlyConditions>) -> Self {
        Self {
            series,
            reference_time,
            hours,
            correction_factors: CorrectionFactors::new(),
            bar_state_index: 1.0,
        }
    }

    pub fn with_correction_factors(mut self, factors: CorrectionFactors) -> Self {
        self.correction_factors = factors;
        self
    }

    pub fn with_bar_state_index(mut self, index: FloatValue) -> Self {
        self.bar_state_index = index;
        self
    }
}

/// Diagnostics for a single forecast hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub time: Time,
    pub local: HourlyConditions,
    /// Offshore state at the surf zone before site correction
    pub propagation: PropagationForecast,
    pub correction_factor: FloatValue,
    /// Offshore height after site correction (m)
    pub corrected_height: FloatValue,
    /// Offshore propagation angle relative to the shoreward normal (degrees)
    pub offshore_angle: FloatValue,
    pub path: Vec<ShoalingStep>,
    pub breaking: BreakingResult,
    /// Whether the breaking criterion was met before the shore
    pub broke: bool,
    /// Breaking significant height divided by the site surf-height ratio (m)
    pub surf_height: FloatValue,
    pub quality: QualityScore,
    pub trend_adjustment: FloatValue,
    /// Quality score with the trend adjustment, 0-10
    pub score: FloatValue,
    pub bar_state_index: FloatValue,
}

impl HourlyForecast {
    /// Offshore state before site correction.
    pub fn raw_offshore(&self) -> WaveState {
        self.propagation.state
    }

    /// Unrated observation of this hour's prediction.
    ///
    /// The offshore state is the uncorrected one, so a later rating teaches
    /// the calibration the full ratio between raw offshore and observed
    /// breaking height.
    pub fn to_observation(&self) -> Observation {
        Observation::new(
            self.time,
            self.raw_offshore(),
            LocalConditions {
                wind_speed: self.local.wind.speed,
                wind_direction: self.local.wind.direction,
                tide: self.local.tide,
            },
            ModelPrediction {
                breaking_height: self.breaking.height,
                breaking_angle: self.breaking.angle_degrees(),
                breaker_type: Some(self.breaking.breaker_type),
                surf_score: self.score,
                quality: self.quality,
            },
        )
    }
}

/// Result of a forecast run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub hours: Vec<HourlyForecast>,
    pub trend: SwellTrend,
}

impl Forecast {
    /// Best-scoring hour, earliest on ties.
    pub fn best_hour(&self) -> Option<&HourlyForecast> {
        self.hours
            .iter()
            .fold(None, |best: Option<&HourlyForecast>, hour| match best {
                Some(b) if b.score >= hour.score => Some(b),
                _ => Some(hour),
            })
    }

    /// Record every hour in an observation log.
    pub fn record_into(&self, log: &mut ObservationLog) -> SurfResult<()> {
        for hour in &self.hours {
            log.record(hour.to_observation())?;
        }
        Ok(())
    }
}

/// Components for one site, built from a [`SiteConfig`].
#[derive(Debug, Clone)]
pub struct ForecastPipeline {
    config: SiteConfig,
    profile: DepthProfile,
    propagation: PropagationForecaster,
    transformer: WaveProfileTransformer,
    scorer: QualityScorer,
    trends: TrendAnalyzer,
    calibration: SiteCalibrationEngine,
}

impl ForecastPipeline {
    pub fn new(config: SiteConfig) -> SurfResult<Self> {
        config.validate()?;

        let dispersion = DispersionSolver::from_parameters(config.dispersion.clone());
        Ok(Self {
            profile: config.depth_profile(),
            propagation: PropagationForecaster::from_parameters(
                config.propagation.clone(),
                dispersion.clone(),
            ),
            transformer: WaveProfileTransformer::new(dispersion, config.transform.clone()),
            scorer: QualityScorer::from_parameters(config.scoring.clone()),
            trends: TrendAnalyzer::from_parameters(config.trend.clone()),
            calibration: SiteCalibrationEngine::from_parameters(config.calibration.clone()),
            config,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Depth profile at mean tide, offshore to shore.
    pub fn profile(&self) -> &DepthProfile {
        &self.profile
    }

    pub fn propagation(&self) -> &PropagationForecaster {
        &self.propagation
    }

    pub fn transformer(&self) -> &WaveProfileTransformer {
        &self.transformer
    }

    pub fn scorer(&self) -> &QualityScorer {
        &self.scorer
    }

    pub fn trends(&self) -> &TrendAnalyzer {
        &self.trends
    }

    pub fn calibration(&self) -> &SiteCalibrationEngine {
        &self.calibration
    }

    /// Correction factors, preferences and bar state learned from a log.
    pub fn calibration_status(&self, log: &ObservationLog, reference_time: Time) -> CalibrationStatus {
        self.calibration.status(log, &self.scorer, reference_time)
    }

    pub fn run(&self, request: &ForecastRequest) -> SurfResult<Forecast> {
        if let Some(index) = request
            .hours
            .windows(2)
            .position(|pair| pair[1].time <= pair[0].time)
        {
            return Err(SurfError::NonIncreasingTime {
                index: index + 1,
                previous: request.hours[index].time,
                current: request.hours[index + 1].time,
            });
        }

        info!(
            "Forecasting {} hours for {} from {} buoy samples",
            request.hours.len(),
            self.config.name,
            request.series.len()
        );

        let trend = self.trends.analyze(&request.series, request.reference_time);
        debug!("Swell trend: {:?}", trend.classification);

        let hours = request
            .hours
            .iter()
            .map(|conditions| self.forecast_hour(request, conditions, &trend))
            .collect();

        Ok(Forecast { hours, trend })
    }

    fn forecast_hour(
        &self,
        request: &ForecastRequest,
        conditions: &HourlyConditions,
        trend: &SwellTrend,
    ) -> HourlyForecast {
        let propagation = self.propagation.forecast(
            &request.series,
            request.reference_time,
            Some(conditions.wind),
        );
        let offshore = propagation.state;

        let correction_factor = request
            .correction_factors
            .factor_for(offshore.direction, offshore.period);
        let corrected_height = offshore.height * correction_factor;

        let angle = angle_to_shore_normal(offshore.direction, self.config.shore_normal);
        let profile = self.profile.with_tide(conditions.tide);

        let transformation = self.transformer.transform(
            corrected_height,
            offshore.period,
            angle,
            &profile,
            self.config.beach_slope(),
        );
        let breaking = transformation.breaking;

        let surf_height = breaking.height / self.config.surf_height_ratio;
        let quality = self.scorer.score(&SurfConditions {
            height: surf_height,
            period: offshore.period,
            breaking_angle: breaking.angle_degrees(),
            breaker_type: Some(breaking.breaker_type),
            wind_speed: conditions.wind.speed,
            wind_direction: conditions.wind.direction,
            tide_level: conditions.tide,
            swell_direction: offshore.direction,
        });

        let trend_adjustment = self.trends.adjustment(trend, offshore.period);
        let score = self
            .trends
            .apply_trend_adjustment(quality.total, trend, offshore.period);

        debug!(
            "{}: breaking {:.2} m at {:.1} m depth, score {:.1}",
            conditions.time, breaking.height, breaking.depth, score
        );

        HourlyForecast {
            time: conditions.time,
            local: *conditions,
            propagation,
            correction_factor,
            corrected_height,
            offshore_angle: angle.to_degrees(),
            path: transformation.path,
            breaking,
            broke: transformation.broke,
            surf_height,
            quality,
            trend_adjustment,
            score,
            bar_state_index: request.bar_state_index,
        }
    }
}
