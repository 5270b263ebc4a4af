use thiserror::Error;

/// Why a map surface refused to place a coin marker.
///
/// A failed placement only loses that one coin; the field is topped up again
/// on the next position update.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("Marker icon resource not found: {0}")]
    MissingIcon(String),

    #[error("Marker placement rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("max_coins must be at least 1")]
    NoCoins,

    #[error("max_coins must be at most {limit} (got {requested})")]
    TooManyCoins { limit: usize, requested: usize },

    #[error("{name} must be a positive, finite number of meters (got {value})")]
    InvalidRadius { name: &'static str, value: f64 },

    #[error("meters_per_degree must be positive and finite (got {0})")]
    InvalidDegreeScale(f64),
}
