//! Surf forecasting for a single break.
//!
//! Offshore buoy readings are propagated to the surf zone, shoaled and
//! refracted across the site's depth profile until they break, and scored.
//! Human ratings of past forecasts feed back into per-site correction
//! factors through the calibration engine.
//!
//! The numerical building blocks live in [`surfcast_core`] and the
//! site-aware components in [`surfcast_components`]. This crate ties them
//! together behind a [`SiteConfig`] and a [`ForecastPipeline`].

pub mod config;
pub mod pipeline;

pub use config::SiteConfig;
pub use pipeline::{Forecast, ForecastPipeline, ForecastRequest, HourlyConditions, HourlyForecast};
