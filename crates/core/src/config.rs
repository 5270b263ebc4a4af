use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, spatial::meters_to_degrees_flat};

pub const DEFAULT_MAX_COINS: usize = 5;
pub const DEFAULT_SPAWN_RADIUS_M: f64 = 500.0;
pub const DEFAULT_COLLECTION_RADIUS_M: f64 = 10.0;

/// Upper bound accepted for `max_coins`; every coin is a live map marker.
pub const MAX_COINS_LIMIT: usize = 1_000;

/// Rough meters per degree of latitude (1 degree is about 111 km).
pub const DEFAULT_METERS_PER_DEGREE: f64 = 111_000.0;

/// Distance model used for the collection check.
///
/// Placement always uses the flat degree-per-meter constant; only collection
/// is measured on the sphere/ellipsoid.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DistanceMetric {
    /// Great-circle distance on a sphere of mean Earth radius.
    Haversine,
    /// Geodesic distance on the WGS84 ellipsoid.
    #[default]
    Geodesic,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinFieldConfig {
    /// Upper bound on live coins.
    pub max_coins: usize,
    /// Coins are dropped within this many meters of the player.
    pub spawn_radius_m: f64,
    /// A coin strictly closer than this is collected.
    pub collection_radius_m: f64,
    pub meters_per_degree: f64,
    pub distance_metric: DistanceMetric,
}

impl Default for CoinFieldConfig {
    fn default() -> Self {
        Self {
            max_coins: DEFAULT_MAX_COINS,
            spawn_radius_m: DEFAULT_SPAWN_RADIUS_M,
            collection_radius_m: DEFAULT_COLLECTION_RADIUS_M,
            meters_per_degree: DEFAULT_METERS_PER_DEGREE,
            distance_metric: DistanceMetric::default(),
        }
    }
}

impl CoinFieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_coins == 0 {
            return Err(ConfigError::NoCoins);
        }
        if self.max_coins > MAX_COINS_LIMIT {
            return Err(ConfigError::TooManyCoins {
                limit: MAX_COINS_LIMIT,
                requested: self.max_coins,
            });
        }

        check_radius("spawn_radius_m", self.spawn_radius_m)?;
        check_radius("collection_radius_m", self.collection_radius_m)?;

        if !(self.meters_per_degree.is_finite() && self.meters_per_degree > 0.0) {
            return Err(ConfigError::InvalidDegreeScale(self.meters_per_degree));
        }

        Ok(())
    }

    /// Spawn radius expressed in degrees using the flat-earth constant.
    pub fn spawn_radius_deg(&self) -> f64 {
        meters_to_degrees_flat(self.spawn_radius_m, self.meters_per_degree)
    }
}

fn check_radius(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRadius { name, value })
    }
}
