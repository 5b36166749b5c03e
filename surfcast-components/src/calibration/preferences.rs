//! Average ratings binned by tide and wind.
//!
//! Reporting only: these statistics describe what raters liked and are not
//! fed back into the forecast.

use crate::observation::Observation;
use crate::quality::WindType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use surfcast_core::timeseries::FloatValue;

/// Tide level bins relative to the site's mean tide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TideBin {
    /// Below -0.4 m
    Low,
    /// -0.4 to -0.2 m
    LowMid,
    /// -0.2 to 0.2 m
    Mid,
    /// 0.2 to 0.4 m
    MidHigh,
    /// Above 0.4 m
    High,
}

impl TideBin {
    pub fn classify(tide: FloatValue) -> Self {
        if tide < -0.4 {
            TideBin::Low
        } else if tide < -0.2 {
            TideBin::LowMid
        } else if tide <= 0.2 {
            TideBin::Mid
        } else if tide <= 0.4 {
            TideBin::MidHigh
        } else {
            TideBin::High
        }
    }
}

/// Wind bins by classification and speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindBin {
    OffshoreLight,
    OffshoreModerate,
    OffshoreStrong,
    CrossLight,
    CrossModerate,
    OnshoreLight,
    OnshoreModerate,
    OnshoreStrong,
}

impl WindBin {
    /// Light below 5 m/s, moderate up to 10 m/s, strong above.
    /// Cross-shore wind has no strong bin.
    pub fn classify(wind_type: WindType, speed: FloatValue) -> Self {
        match wind_type {
            WindType::Offshore if speed < 5.0 => WindBin::OffshoreLight,
            WindType::Offshore if speed <= 10.0 => WindBin::OffshoreModerate,
            WindType::Offshore => WindBin::OffshoreStrong,
            WindType::Cross if speed < 5.0 => WindBin::CrossLight,
            WindType::Cross => WindBin::CrossModerate,
            WindType::Onshore if speed < 5.0 => WindBin::OnshoreLight,
            WindType::Onshore if speed <= 10.0 => WindBin::OnshoreModerate,
            WindType::Onshore => WindBin::OnshoreStrong,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreferenceBin {
    pub average_rating: FloatValue,
    pub count: usize,
}

/// Populated bins only.
pub type PreferenceReport<K> = BTreeMap<K, PreferenceBin>;

/// Average rating per bin over the rated observations.
///
/// Returns an empty report when fewer than `min_rated` observations are rated.
pub fn rating_preferences<'a, K, I, F>(
    observations: I,
    min_rated: usize,
    mut bin_of: F,
) -> PreferenceReport<K>
where
    K: Ord,
    I: IntoIterator<Item = &'a Observation>,
    F: FnMut(&Observation) -> K,
{
    let rated: Vec<(&Observation, FloatValue)> = observations
        .into_iter()
        .filter_map(|o| o.rating.as_ref().map(|r| (o, r.value)))
        .collect();
    if rated.len() < min_rated {
        return BTreeMap::new();
    }

    let mut sums: BTreeMap<K, (FloatValue, usize)> = BTreeMap::new();
    for (observation, value) in rated {
        let entry = sums.entry(bin_of(observation)).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(bin, (sum, count))| {
            (
                bin,
                PreferenceBin {
                    average_rating: sum / count as FloatValue,
                    count,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tide_bins() {
        assert_eq!(TideBin::classify(-0.5), TideBin::Low);
        assert_eq!(TideBin::classify(-0.4), TideBin::LowMid);
        assert_eq!(TideBin::classify(-0.2), TideBin::Mid);
        assert_eq!(TideBin::classify(0.2), TideBin::Mid);
        assert_eq!(TideBin::classify(0.4), TideBin::MidHigh);
        assert_eq!(TideBin::classify(0.41), TideBin::High);
    }

    #[test]
    fn test_wind_bins() {
        assert_eq!(WindBin::classify(WindType::Offshore, 4.9), WindBin::OffshoreLight);
        assert_eq!(WindBin::classify(WindType::Offshore, 10.0), WindBin::OffshoreModerate);
        assert_eq!(WindBin::classify(WindType::Offshore, 10.1), WindBin::OffshoreStrong);
        assert_eq!(WindBin::classify(WindType::Cross, 15.0), WindBin::CrossModerate);
        assert_eq!(WindBin::classify(WindType::Onshore, 2.0), WindBin::OnshoreLight);
        assert_eq!(WindBin::classify(WindType::Onshore, 12.0), WindBin::OnshoreStrong);
    }

    #[test]
    fn test_bin_names_serialize_in_snake_case() {
        let json = serde_json::to_string(&WindBin::OffshoreLight).unwrap();
        assert_eq!(json, "\"offshore_light\"");
    }
}
