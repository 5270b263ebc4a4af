//! Records crossing the foreign-function boundary.

use coin_field_core::{config, surface::MarkerStyle};
use geo::Point;

#[derive(Debug, Clone, Copy, PartialEq, uniffi::Record)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<LatLng> for Point {
    fn from(value: LatLng) -> Self {
        Point::new(value.longitude, value.latitude)
    }
}

impl From<Point> for LatLng {
    fn from(value: Point) -> Self {
        LatLng {
            latitude: value.y(),
            longitude: value.x(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum DistanceMetric {
    Haversine,
    Geodesic,
}

impl From<DistanceMetric> for config::DistanceMetric {
    fn from(value: DistanceMetric) -> Self {
        match value {
            DistanceMetric::Haversine => config::DistanceMetric::Haversine,
            DistanceMetric::Geodesic => config::DistanceMetric::Geodesic,
        }
    }
}

impl From<config::DistanceMetric> for DistanceMetric {
    fn from(value: config::DistanceMetric) -> Self {
        match value {
            config::DistanceMetric::Haversine => DistanceMetric::Haversine,
            config::DistanceMetric::Geodesic => DistanceMetric::Geodesic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct MarkerAppearance {
    pub title: String,
    pub snippet: String,
    /// Drawable resource name, e.g. `coin`.
    pub icon: String,
}

impl From<MarkerAppearance> for MarkerStyle {
    fn from(value: MarkerAppearance) -> Self {
        MarkerStyle {
            title: value.title,
            snippet: value.snippet,
            icon: value.icon,
        }
    }
}

impl From<&MarkerStyle> for MarkerAppearance {
    fn from(value: &MarkerStyle) -> Self {
        MarkerAppearance {
            title: value.title.clone(),
            snippet: value.snippet.clone(),
            icon: value.icon.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct GameConfig {
    pub max_coins: u32,
    pub spawn_radius_m: f64,
    pub collection_radius_m: f64,
    pub meters_per_degree: f64,
    pub distance_metric: DistanceMetric,
    pub marker: MarkerAppearance,
}

impl Default for GameConfig {
    fn default() -> Self {
        let core = config::CoinFieldConfig::default();

        GameConfig {
            max_coins: core.max_coins as u32,
            spawn_radius_m: core.spawn_radius_m,
            collection_radius_m: core.collection_radius_m,
            meters_per_degree: core.meters_per_degree,
            distance_metric: core.distance_metric.into(),
            marker: MarkerAppearance::from(&MarkerStyle::default()),
        }
    }
}

impl GameConfig {
    pub(crate) fn split(self) -> (config::CoinFieldConfig, MarkerStyle) {
        let core = config::CoinFieldConfig {
            max_coins: self.max_coins as usize,
            spawn_radius_m: self.spawn_radius_m,
            collection_radius_m: self.collection_radius_m,
            meters_per_degree: self.meters_per_degree,
            distance_metric: self.distance_metric.into(),
        };

        (core, self.marker.into())
    }
}

/// Result of feeding one location reading into a session.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct UpdateSummary {
    /// Handle of the coin picked up by this reading, if any.
    pub collected: Option<u64>,
    pub placed: u32,
    pub score: u32,
    pub live_coins: u32,
}
