//! A map surface that lives entirely in memory.
//!
//! Useful anywhere a real map SDK is not available: unit tests, the
//! `coin-walk` simulator, headless replays.

use std::{collections::BTreeMap, fmt};

use geo::Point;

use crate::{
    coin::{Coin, Score},
    error::PlacementError,
    surface::{GameEvents, MapSurface, MarkerStyle},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(pub u64);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub position: Point,
    pub style: MarkerStyle,
    pub visible: bool,
}

#[derive(Debug, Default)]
pub struct InMemorySurface {
    markers: BTreeMap<MarkerId, Marker>,
    next_id: u64,
    rejections_pending: usize,
    known_icons: Option<Vec<String>>,
    removals: usize,
}

impl InMemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept markers whose icon is in `icons`.
    pub fn with_icons<I, S>(icons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known_icons: Some(icons.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Reject the next `count` placements.
    pub fn reject_next(&mut self, count: usize) {
        self.rejections_pending = count;
    }

    pub fn set_visible(&mut self, id: MarkerId, visible: bool) {
        if let Some(marker) = self.markers.get_mut(&id) {
            marker.visible = visible;
        }
    }

    /// Move a marker, as a user dragging it on the map would.
    pub fn move_marker(&mut self, id: MarkerId, position: Point) {
        if let Some(marker) = self.markers.get_mut(&id) {
            marker.position = position;
        }
    }

    /// Drop a marker behind the owner's back.
    pub fn forget(&mut self, id: MarkerId) {
        self.markers.remove(&id);
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(&id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// How many markers were removed through [`MapSurface::remove_marker`].
    pub fn removals(&self) -> usize {
        self.removals
    }

    /// Insert a marker directly, bypassing any rejection rules.
    pub fn insert(&mut self, position: Point) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.markers.insert(
            id,
            Marker {
                position,
                style: MarkerStyle::default(),
                visible: true,
            },
        );
        id
    }
}

impl MapSurface for InMemorySurface {
    type Handle = MarkerId;

    fn place_marker(
        &mut self,
        position: Point,
        style: &MarkerStyle,
    ) -> Result<MarkerId, PlacementError> {
        if self.rejections_pending > 0 {
            self.rejections_pending -= 1;
            return Err(PlacementError::Rejected("surface refused marker".into()));
        }

        if let Some(icons) = &self.known_icons {
            if !icons.iter().any(|icon| *icon == style.icon) {
                return Err(PlacementError::MissingIcon(style.icon.clone()));
            }
        }

        let id = self.insert(position);
        if let Some(marker) = self.markers.get_mut(&id) {
            marker.style = style.clone();
        }
        Ok(id)
    }

    fn remove_marker(&mut self, handle: &MarkerId) {
        if self.markers.remove(handle).is_some() {
            self.removals += 1;
        }
    }

    fn marker_position(&self, handle: &MarkerId) -> Option<Point> {
        self.markers.get(handle).map(|m| m.position)
    }

    fn is_visible(&self, handle: &MarkerId) -> bool {
        self.markers.get(handle).is_some_and(|m| m.visible)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent<H> {
    ScoreChanged(Score),
    CoinCollected { coin: Coin<H>, score: Score },
}

/// Event sink that keeps everything it is told.
#[derive(Clone, Debug)]
pub struct RecordedEvents<H = MarkerId> {
    pub events: Vec<RecordedEvent<H>>,
}

impl<H> Default for RecordedEvents<H> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<H> RecordedEvents<H> {
    pub fn collections(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RecordedEvent::CoinCollected { .. }))
            .count()
    }

    pub fn last_score(&self) -> Option<Score> {
        self.events.iter().rev().find_map(|e| match e {
            RecordedEvent::ScoreChanged(score) => Some(*score),
            RecordedEvent::CoinCollected { .. } => None,
        })
    }
}

impl<H: Clone> GameEvents<H> for RecordedEvents<H> {
    fn score_changed(&mut self, score: Score) {
        self.events.push(RecordedEvent::ScoreChanged(score));
    }

    fn coin_collected(&mut self, coin: &Coin<H>, score: Score) {
        self.events.push(RecordedEvent::CoinCollected {
            coin: coin.clone(),
            score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_and_remove() {
        let mut surface = InMemorySurface::new();
        let style = MarkerStyle::default();

        let a = surface.place_marker(Point::new(1.0, 2.0), &style).unwrap();
        let b = surface.place_marker(Point::new(3.0, 4.0), &style).unwrap();
        assert_ne!(a, b);
        assert_eq!(surface.marker_position(&b), Some(Point::new(3.0, 4.0)));
        assert!(surface.is_visible(&a));

        surface.remove_marker(&a);
        assert_eq!(surface.len(), 1);
        assert_eq!(surface.marker_position(&a), None);
        assert!(!surface.is_visible(&a));
        assert_eq!(surface.removals(), 1);

        // Removing an unknown marker is not counted.
        surface.remove_marker(&a);
        assert_eq!(surface.removals(), 1);
    }

    #[test]
    fn test_rejections() {
        let mut surface = InMemorySurface::new();
        let style = MarkerStyle::default();
        surface.reject_next(1);

        assert!(matches!(
            surface.place_marker(Point::new(0.0, 0.0), &style),
            Err(PlacementError::Rejected(_))
        ));
        assert!(surface.place_marker(Point::new(0.0, 0.0), &style).is_ok());
    }

    #[test]
    fn test_missing_icon() {
        let mut surface = InMemorySurface::with_icons(["gem"]);
        let err = surface
            .place_marker(Point::new(0.0, 0.0), &MarkerStyle::default())
            .unwrap_err();

        assert_eq!(err, PlacementError::MissingIcon("coin".into()));
        assert!(surface.is_empty());
    }
}
