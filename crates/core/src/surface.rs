//! Seams to the outside world.
//!
//! A map SDK implements [`MapSurface`], the UI implements [`GameEvents`], and
//! whatever delivers GPS fixes drives a [`LocationListener`].

use std::fmt::Debug;

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::{
    coin::{Coin, Score},
    error::PlacementError,
};

pub const COIN_TITLE: &str = "Gold Coin";
pub const COIN_SNIPPET: &str = "Collect me!";
pub const COIN_ICON: &str = "coin";

/// How a coin marker should look on the map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub title: String,
    pub snippet: String,
    /// Name of the icon resource the map SDK should load.
    pub icon: String,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            title: COIN_TITLE.to_owned(),
            snippet: COIN_SNIPPET.to_owned(),
            icon: COIN_ICON.to_owned(),
        }
    }
}

/// A map that can show, hide and report on markers.
///
/// Calls are expected to be synchronous and cheap (in-memory SDK state).
pub trait MapSurface {
    /// Opaque marker identity issued by the surface.
    type Handle: Clone + Debug;

    fn place_marker(
        &mut self,
        position: Point,
        style: &MarkerStyle,
    ) -> Result<Self::Handle, PlacementError>;

    fn remove_marker(&mut self, handle: &Self::Handle);

    /// Where the marker currently is, or `None` if the surface lost it.
    fn marker_position(&self, handle: &Self::Handle) -> Option<Point>;

    fn is_visible(&self, handle: &Self::Handle) -> bool;
}

/// User-facing notifications.
pub trait GameEvents<H> {
    fn score_changed(&mut self, score: Score);

    fn coin_collected(&mut self, coin: &Coin<H>, score: Score);
}

/// Receiver for push-style position readings.
///
/// `None` means the positioning source has no fix right now.
pub trait LocationListener<S: MapSurface> {
    fn on_location_change(
        &mut self,
        surface: &mut S,
        events: &mut dyn GameEvents<S::Handle>,
        position: Option<Point>,
    );
}

impl<H> GameEvents<H> for () {
    fn score_changed(&mut self, _score: Score) {}

    fn coin_collected(&mut self, _coin: &Coin<H>, _score: Score) {}
}
