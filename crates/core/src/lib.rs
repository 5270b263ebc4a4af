//! # coin-field-core
//!
//! Coin lifecycle for a location-based collection game.
//!
//! The player walks around the real world; a handful of coins are scattered
//! on the map near them. Walking within the collection radius of a coin picks
//! it up, bumps the score, and a fresh coin is dropped somewhere nearby.
//!
//! The crate knows nothing about a concrete map SDK or location provider.
//! Those plug in through [`MapSurface`] and [`GameEvents`], and position
//! readings are pushed into a [`CoinFieldController`] one at a time.
//!
//! ## Example
//!
//! ```
//! use coin_field_core::prelude::*;
//! use geo::Point;
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut surface = InMemorySurface::new();
//! let mut events = RecordedEvents::default();
//! let mut controller =
//!     CoinFieldController::new(CoinFieldConfig::default(), StdRng::seed_from_u64(7)).unwrap();
//!
//! // Lon/lat order, as everywhere in `geo`.
//! let player = Point::new(-73.9857, 40.7484);
//! controller.on_position_update(&mut surface, &mut events, Some(player));
//!
//! assert_eq!(controller.field().len(), 5);
//! assert_eq!(controller.score().value(), 0);
//! ```

pub mod coin;
pub mod config;
pub mod controller;
pub mod error;
pub mod memory;
pub mod spatial;
pub mod surface;

pub mod prelude {
    pub use crate::coin::{Coin, CoinField, Score};
    pub use crate::config::{CoinFieldConfig, DistanceMetric};
    pub use crate::controller::{CoinFieldController, UpdateOutcome};
    pub use crate::error::{ConfigError, PlacementError};
    pub use crate::memory::{InMemorySurface, MarkerId, RecordedEvent, RecordedEvents};
    pub use crate::surface::{GameEvents, LocationListener, MapSurface, MarkerStyle};
}

pub use prelude::*;
