//! Foreign map and UI adapters.
//!
//! Kotlin/Swift implement [`MapSurfaceDelegate`] on top of their map SDK and
//! [`GameEventListener`] on top of their UI. Marker handles are plain `u64`s
//! the delegate hands out.

use std::sync::Arc;

use coin_field_core::{
    coin::{COLLECTED_MESSAGE, Coin, Score},
    error::PlacementError,
    surface::{GameEvents, MapSurface, MarkerStyle},
};
use geo::Point;

use crate::types::{LatLng, MarkerAppearance};

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum SurfaceError {
    #[error("Marker icon resource not found: {icon}")]
    MissingIcon { icon: String },

    #[error("Marker placement rejected: {reason}")]
    Rejected { reason: String },
}

impl From<uniffi::UnexpectedUniFFICallbackError> for SurfaceError {
    fn from(value: uniffi::UnexpectedUniFFICallbackError) -> Self {
        SurfaceError::Rejected {
            reason: value.reason,
        }
    }
}

impl From<SurfaceError> for PlacementError {
    fn from(value: SurfaceError) -> Self {
        match value {
            SurfaceError::MissingIcon { icon } => PlacementError::MissingIcon(icon),
            SurfaceError::Rejected { reason } => PlacementError::Rejected(reason),
        }
    }
}

/// The platform map the coins live on.
///
/// Every method runs while the owning [`GameSession`](crate::session::GameSession)
/// holds its lock. Implementations must not call back into that session, or
/// the call blocks forever.
#[uniffi::export(with_foreign)]
pub trait MapSurfaceDelegate: Send + Sync {
    fn place_marker(&self, position: LatLng, style: MarkerAppearance) -> Result<u64, SurfaceError>;
    fn remove_marker(&self, handle: u64);
    fn marker_position(&self, handle: u64) -> Option<LatLng>;
    fn is_visible(&self, handle: u64) -> bool;
}

/// Score and collection notifications. Delivered after the session lock is
/// released, so implementations may query the session.
#[uniffi::export(with_foreign)]
pub trait GameEventListener: Send + Sync {
    /// `text` is ready to display, e.g. "Score: 3".
    fn on_score_changed(&self, score: u32, text: String);
    fn on_coin_collected(&self, message: String);
}

pub(crate) struct ForeignSurface {
    delegate: Arc<dyn MapSurfaceDelegate>,
}

impl ForeignSurface {
    pub(crate) fn new(delegate: Arc<dyn MapSurfaceDelegate>) -> Self {
        Self { delegate }
    }
}

impl MapSurface for ForeignSurface {
    type Handle = u64;

    fn place_marker(&mut self, position: Point, style: &MarkerStyle) -> Result<u64, PlacementError> {
        self.delegate
            .place_marker(position.into(), style.into())
            .map_err(PlacementError::from)
    }

    fn remove_marker(&mut self, handle: &u64) {
        self.delegate.remove_marker(*handle);
    }

    fn marker_position(&self, handle: &u64) -> Option<Point> {
        self.delegate.marker_position(*handle).map(Point::from)
    }

    fn is_visible(&self, handle: &u64) -> bool {
        self.delegate.is_visible(*handle)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Notification {
    Score(Score),
    Collected,
}

/// Queues notifications so they can be delivered once the session lock has
/// been released; listeners are free to call back into the session.
#[derive(Debug, Default)]
pub(crate) struct PendingEvents {
    queue: Vec<Notification>,
}

impl PendingEvents {
    pub(crate) fn deliver(notifications: Vec<Notification>, listener: &dyn GameEventListener) {
        for notification in notifications {
            match notification {
                Notification::Score(score) => {
                    listener.on_score_changed(score.value(), score.to_string())
                }
                Notification::Collected => listener.on_coin_collected(COLLECTED_MESSAGE.to_owned()),
            }
        }
    }

    pub(crate) fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.queue)
    }
}

impl GameEvents<u64> for PendingEvents {
    fn score_changed(&mut self, score: Score) {
        self.queue.push(Notification::Score(score));
    }

    fn coin_collected(&mut self, _coin: &Coin<u64>, _score: Score) {
        self.queue.push(Notification::Collected);
    }
}
