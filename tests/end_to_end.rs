//! End-to-end forecasts through the full pipeline.
//!
//! The reference site uses the default configuration: a 10-point profile out
//! to 10 km, shore normal 110°, beach slope 6.5°. The reference swell is
//! 1.5 m at 8 s from the east with a 5 m/s offshore breeze.

use approx::assert_relative_eq;
use chrono::{DateTime, Duration, TimeZone, Utc};
use surfcast::{ForecastPipeline, ForecastRequest, HourlyConditions, SiteConfig};
use surfcast_components::calibration::{BinRange, CorrectionBin, CorrectionFactors};
use surfcast_components::observation::{CalibrationQuality, ObservationLog, Rating};
use surfcast_components::propagation::WindConditions;
use surfcast_components::quality::WindType;
use surfcast_components::trends::TrendClass;
use surfcast_core::errors::SurfError;
use surfcast_core::timeseries::BuoySeries;
use surfcast_core::transform::BreakerType;

fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 5, 12, 0, 0).unwrap()
}

/// Seven hourly buoy samples of a steady swell ending at the reference time.
fn steady_series(height: f64, period: f64, direction: f64) -> BuoySeries {
    let times = (0..7)
        .map(|i| reference_time() - Duration::hours(6 - i))
        .collect();
    BuoySeries::new(times, vec![height; 7], vec![period; 7], vec![direction; 7]).unwrap()
}

fn hours(count: i64, wind: WindConditions, tide: f64) -> Vec<HourlyConditions> {
    (0..count)
        .map(|i| HourlyConditions::new(reference_time() + Duration::hours(i), wind, tide))
        .collect()
}

fn offshore_breeze() -> WindConditions {
    WindConditions::new(5.0, 290.0)
}

fn pipeline() -> ForecastPipeline {
    ForecastPipeline::new(SiteConfig::default()).unwrap()
}

mod reference_scenario {
    use super::*;

    fn request() -> ForecastRequest {
        ForecastRequest::new(
            steady_series(1.5, 8.0, 90.0),
            reference_time(),
            hours(3, offshore_breeze(), 0.0),
        )
    }

    /// The swell breaks on the inner bar, within the profile.
    #[test]
    fn breaks_near_the_shallow_end() {
        let forecast = pipeline().run(&request()).unwrap();
        assert_eq!(forecast.hours.len(), 3);

        let hour = &forecast.hours[0];
        assert!(hour.broke);
        assert!(hour.breaking.depth > 0.0);
        assert!(hour.breaking.depth <= 3.5);
        assert!(hour.breaking.distance >= 0.0);
        assert!(hour.breaking.distance <= 10000.0);
        assert!(hour.breaking.height >= 0.78 * hour.breaking.depth);
        assert!(hour.surf_height < hour.breaking.height);
    }

    /// Propagation loses a little height over the 34 km from the buoy.
    #[test]
    fn propagation_decays_swell() {
        let forecast = pipeline().run(&request()).unwrap();
        let propagation = &forecast.hours[0].propagation;

        assert!(!propagation.used_fallback);
        assert!(propagation.travel_time_hours > 1.0);
        assert!(propagation.travel_time_hours < 2.0);
        assert!(propagation.swell_height < 1.5);
        assert!(propagation.swell_height > 1.4);
        // Wind opposes the swell, so its sea is attenuated
        assert_relative_eq!(propagation.wind_wave_height, 0.06, epsilon = 1e-12);
    }

    /// A surf-similarity number near 1 gives plunging waves.
    #[test]
    fn breaker_is_plunging() {
        let forecast = pipeline().run(&request()).unwrap();
        let breaking = &forecast.hours[0].breaking;
        assert!(breaking.surf_similarity > 0.4);
        assert!(breaking.surf_similarity < 2.0);
        assert_eq!(breaking.breaker_type, BreakerType::Plunging);
    }

    /// Light offshore wind takes the offshore branch of the wind score.
    #[test]
    fn offshore_wind_scores_well() {
        let forecast = pipeline().run(&request()).unwrap();
        let quality = &forecast.hours[0].quality;
        assert_eq!(quality.wind_type, WindType::Offshore);
        assert!(quality.sub_scores.wind >= 0.9);
    }

    /// A steady swell leaves the score untouched by the trend.
    #[test]
    fn steady_trend_has_no_adjustment() {
        let forecast = pipeline().run(&request()).unwrap();
        assert_eq!(forecast.trend.classification, TrendClass::Steady);
        for hour in &forecast.hours {
            assert_eq!(hour.trend_adjustment, 0.0);
            assert_eq!(hour.score, hour.quality.total);
            assert!((0.0..=10.0).contains(&hour.score));
        }
    }

    /// Identical requests give identical forecasts.
    #[test]
    fn deterministic() {
        let p = pipeline();
        let first = p.run(&request()).unwrap();
        let second = p.run(&request()).unwrap();
        assert_eq!(first, second);
    }

    /// The shoaling path runs from the offshore end up to the breaking point.
    #[test]
    fn path_ends_at_breaking_point() {
        let forecast = pipeline().run(&request()).unwrap();
        let hour = &forecast.hours[0];
        let first = hour.path.first().unwrap();
        let last = hour.path.last().unwrap();
        assert_eq!(first.distance, 10000.0);
        assert_eq!(last.distance, hour.breaking.distance);
        assert!(hour
            .path
            .windows(2)
            .all(|pair| pair[1].distance < pair[0].distance));
    }

    /// The offshore angle is relative to the shoreward normal.
    #[test]
    fn offshore_angle_relative_to_shore() {
        let forecast = pipeline().run(&request()).unwrap();
        assert_relative_eq!(forecast.hours[0].offshore_angle, -20.0, epsilon = 1e-9);
    }
}

mod local_conditions {
    use super::*;

    /// Higher water moves the break toward the shore.
    #[test]
    fn high_tide_breaks_closer_in() {
        let p = pipeline();
        let series = steady_series(1.5, 8.0, 90.0);
        let low = p
            .run(&ForecastRequest::new(
                series.clone(),
                reference_time(),
                hours(1, offshore_breeze(), 0.0),
            ))
            .unwrap();
        let high = p
            .run(&ForecastRequest::new(
                series,
                reference_time(),
                hours(1, offshore_breeze(), 1.0),
            ))
            .unwrap();

        let low = &low.hours[0].breaking;
        let high = &high.hours[0].breaking;
        assert!(high.distance <= low.distance);
        assert!(high.depth > 0.0);
    }

    /// Strong onshore wind scores worse than a light offshore breeze.
    #[test]
    fn onshore_wind_scores_worse() {
        let p = pipeline();
        let series = steady_series(1.5, 8.0, 90.0);
        let offshore = p
            .run(&ForecastRequest::new(
                series.clone(),
                reference_time(),
                hours(1, offshore_breeze(), 0.0),
            ))
            .unwrap();
        let onshore = p
            .run(&ForecastRequest::new(
                series,
                reference_time(),
                hours(1, WindConditions::new(12.0, 90.0), 0.0),
            ))
            .unwrap();

        assert_eq!(onshore.hours[0].quality.wind_type, WindType::Onshore);
        assert!(onshore.hours[0].score < offshore.hours[0].score);
    }
}

mod request_handling {
    use super::*;

    /// Hours must be strictly increasing.
    #[test]
    fn rejects_out_of_order_hours() {
        let mut conditions = hours(3, offshore_breeze(), 0.0);
        conditions.swap(0, 2);
        let request =
            ForecastRequest::new(steady_series(1.5, 8.0, 90.0), reference_time(), conditions);
        assert!(matches!(
            pipeline().run(&request),
            Err(SurfError::NonIncreasingTime { .. })
        ));
    }

    /// Without buoy data the forecast still runs on the fallback swell.
    #[test]
    fn empty_series_uses_fallback() {
        let request = ForecastRequest::new(
            BuoySeries::empty(),
            reference_time(),
            hours(2, offshore_breeze(), 0.0),
        );
        let forecast = pipeline().run(&request).unwrap();

        assert_eq!(forecast.trend.classification, TrendClass::InsufficientData);
        for hour in &forecast.hours {
            assert!(hour.propagation.used_fallback);
            assert_eq!(hour.propagation.state.period, 10.0);
            assert!((0.0..=10.0).contains(&hour.score));
        }
    }

    /// A matching correction bin scales the offshore height.
    #[test]
    fn correction_factor_applied() {
        let factors = CorrectionFactors::from_bins(vec![CorrectionBin {
            direction: BinRange::new(90.0, 120.0),
            period: BinRange::new(7.0, 10.0),
            factor: 1.2,
            samples: 4,
        }]);
        let request = ForecastRequest::new(
            steady_series(1.5, 8.0, 100.0),
            reference_time(),
            hours(1, offshore_breeze(), 0.0),
        )
        .with_correction_factors(factors)
        .with_bar_state_index(1.1);

        let forecast = pipeline().run(&request).unwrap();
        let hour = &forecast.hours[0];
        assert_eq!(hour.correction_factor, 1.2);
        assert_relative_eq!(
            hour.corrected_height,
            1.2 * hour.propagation.state.height,
            max_relative = 1e-12
        );
        assert_eq!(hour.bar_state_index, 1.1);
    }

    /// Swell outside every bin is left alone.
    #[test]
    fn unmatched_bin_is_identity() {
        let factors = CorrectionFactors::from_bins(vec![CorrectionBin {
            direction: BinRange::new(90.0, 120.0),
            period: BinRange::new(10.0, 14.0),
            factor: 1.2,
            samples: 4,
        }]);
        let request = ForecastRequest::new(
            steady_series(1.5, 8.0, 100.0),
            reference_time(),
            hours(1, offshore_breeze(), 0.0),
        )
        .with_correction_factors(factors);

        let forecast = pipeline().run(&request).unwrap();
        let hour = &forecast.hours[0];
        assert_eq!(hour.correction_factor, 1.0);
        assert_eq!(hour.corrected_height, hour.propagation.state.height);
    }
}

mod feedback_loop {
    use super::*;

    /// Rated forecasts teach the site a correction that later forecasts use.
    #[test]
    fn ratings_feed_back_into_forecasts() {
        let p = pipeline();
        let series = steady_series(1.5, 8.0, 100.0);
        let first = p
            .run(&ForecastRequest::new(
                series.clone(),
                reference_time(),
                hours(6, offshore_breeze(), 0.0),
            ))
            .unwrap();

        let mut log = ObservationLog::new();
        first.record_into(&mut log).unwrap();
        assert_eq!(log.len(), 6);

        let window = p.calibration().rating_window();
        for hour in &first.hours {
            // Surfers saw waves half again as big as the raw offshore height
            let seen = 1.5 * hour.propagation.state.height;
            let rating = Rating::new(7.0)
                .unwrap()
                .with_tags(["clean"])
                .with_observed_height(seen);
            log.attach_rating(hour.time + Duration::minutes(10), rating, window)
                .unwrap();
        }
        assert_eq!(log.rated_count(), 6);

        let status = p.calibration_status(&log, reference_time() + Duration::hours(6));
        assert_eq!(status.quality, CalibrationQuality::Poor);
        assert_eq!(status.total_observations, 6);
        assert_eq!(status.bar_state_index, 1.0);
        assert_relative_eq!(
            status.correction_factors.factor_for(100.0, 8.0),
            1.5,
            max_relative = 1e-9
        );

        let second = p
            .run(
                &ForecastRequest::new(
                    series,
                    reference_time() + Duration::hours(6),
                    hours(1, offshore_breeze(), 0.0),
                )
                .with_correction_factors(status.correction_factors.clone())
                .with_bar_state_index(status.bar_state_index),
            )
            .unwrap();
        assert_relative_eq!(second.hours[0].correction_factor, 1.5, max_relative = 1e-9);
    }

    /// Recording the same forecast twice breaks the log's time ordering.
    #[test]
    fn log_rejects_repeated_hours() {
        let forecast = pipeline()
            .run(&ForecastRequest::new(
                steady_series(1.5, 8.0, 90.0),
                reference_time(),
                hours(2, offshore_breeze(), 0.0),
            ))
            .unwrap();
        let mut log = ObservationLog::new();
        forecast.record_into(&mut log).unwrap();
        assert!(matches!(
            forecast.record_into(&mut log),
            Err(SurfError::NonIncreasingTime { .. })
        ));
    }
}

mod site_config {
    use super::*;

    /// A site loaded from TOML drives the pipeline.
    #[test]
    fn pipeline_from_toml() {
        let config = SiteConfig::from_toml_str(
            r#"
            name = "reef"
            shore_normal = 90.0

            [[profile]]
            distance = 0.0
            depth = 0.0

            [[profile]]
            distance = 200.0
            depth = 2.0

            [[profile]]
            distance = 2000.0
            depth = 20.0
            "#,
        )
        .unwrap();
        let p = ForecastPipeline::new(config).unwrap();
        assert_eq!(p.profile().len(), 3);

        let forecast = p
            .run(&ForecastRequest::new(
                steady_series(1.5, 12.0, 90.0),
                reference_time(),
                hours(1, offshore_breeze(), 0.0),
            ))
            .unwrap();
        let hour = &forecast.hours[0];
        assert_eq!(hour.path.first().unwrap().distance, 2000.0);
        assert_relative_eq!(hour.offshore_angle, 0.0, epsilon = 1e-9);
    }
}
