use std::sync::{Arc, Mutex, MutexGuard};

use coin_field_core::controller::CoinFieldController;
use geo::Point;

use crate::{
    surface::{ForeignSurface, GameEventListener, MapSurfaceDelegate, PendingEvents},
    types::{GameConfig, LatLng, UpdateSummary},
};

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum SessionError {
    #[error("{0}")]
    InvalidConfig(String),
    #[error("session state was poisoned by an earlier panic")]
    Poisoned,
}

struct SessionState {
    controller: CoinFieldController<u64>,
    surface: ForeignSurface,
    pending: PendingEvents,
}

/// One running game: the coin field on a single map view.
///
/// Feed it every location fix via [`GameSession::on_location_change`].
/// The map delegate is driven under the session lock; the event listener is
/// not.
#[derive(uniffi::Object)]
pub struct GameSession {
    state: Mutex<SessionState>,
    listener: Arc<dyn GameEventListener>,
}

impl GameSession {
    fn lock(&self) -> Result<MutexGuard<'_, SessionState>, SessionError> {
        self.state.lock().map_err(|_| SessionError::Poisoned)
    }
}

#[uniffi::export]
impl GameSession {
    /// Start a session. The listener immediately receives the initial score.
    #[uniffi::constructor]
    pub fn new(
        config: GameConfig,
        map: Arc<dyn MapSurfaceDelegate>,
        listener: Arc<dyn GameEventListener>,
    ) -> Result<Self, SessionError> {
        let (config, style) = config.split();
        let controller = CoinFieldController::from_entropy(config)
            .map_err(|e| SessionError::InvalidConfig(e.to_string()))?
            .with_style(style);

        let mut pending = PendingEvents::default();
        controller.announce_score(&mut pending);
        PendingEvents::deliver(pending.take(), listener.as_ref());

        tracing::info!(max_coins = controller.config().max_coins, "game session started");

        Ok(Self {
            state: Mutex::new(SessionState {
                controller,
                surface: ForeignSurface::new(map),
                pending,
            }),
            listener,
        })
    }

    /// Handle one reading from the positioning source; `None` means no fix.
    pub fn on_location_change(
        &self,
        position: Option<LatLng>,
    ) -> Result<UpdateSummary, SessionError> {
        let mut guard = self.lock()?;
        let state = &mut *guard;

        let outcome = state.controller.on_position_update(
            &mut state.surface,
            &mut state.pending,
            position.map(Point::from),
        );

        let summary = UpdateSummary {
            collected: outcome.collected.map(|coin| coin.handle),
            placed: outcome.placed as u32,
            score: state.controller.score().value(),
            live_coins: state.controller.field().len() as u32,
        };

        // The listener may call back into the session, so release the lock first.
        let notifications = state.pending.take();
        drop(guard);
        PendingEvents::deliver(notifications, self.listener.as_ref());

        Ok(summary)
    }

    pub fn score(&self) -> Result<u32, SessionError> {
        Ok(self.lock()?.controller.score().value())
    }

    pub fn score_text(&self) -> Result<String, SessionError> {
        Ok(self.lock()?.controller.score().to_string())
    }

    /// Positions of the coins currently on the map, in placement order.
    pub fn live_coins(&self) -> Result<Vec<LatLng>, SessionError> {
        let state = self.lock()?;
        Ok(state
            .controller
            .field()
            .iter()
            .map(|coin| coin.position.into())
            .collect())
    }

    /// Take every coin off the map. The score survives.
    pub fn dispose(&self) -> Result<(), SessionError> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        state.controller.clear(&mut state.surface);

        tracing::info!(score = state.controller.score().value(), "game session disposed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::{OnceLock, Weak};

    use super::*;
    use crate::surface::SurfaceError;
    use crate::types::MarkerAppearance;

    #[derive(Default)]
    struct FakeMap {
        markers: Mutex<BTreeMap<u64, LatLng>>,
        next: Mutex<u64>,
    }

    impl FakeMap {
        fn move_marker(&self, handle: u64, position: LatLng) {
            self.markers.lock().unwrap().insert(handle, position);
        }

        fn len(&self) -> usize {
            self.markers.lock().unwrap().len()
        }
    }

    impl MapSurfaceDelegate for FakeMap {
        fn place_marker(
            &self,
            position: LatLng,
            style: MarkerAppearance,
        ) -> Result<u64, SurfaceError> {
            if style.icon != "coin" {
                return Err(SurfaceError::MissingIcon { icon: style.icon });
            }

            let mut next = self.next.lock().unwrap();
            *next += 1;
            self.markers.lock().unwrap().insert(*next, position);
            Ok(*next)
        }

        fn remove_marker(&self, handle: u64) {
            self.markers.lock().unwrap().remove(&handle);
        }

        fn marker_position(&self, handle: u64) -> Option<LatLng> {
            self.markers.lock().unwrap().get(&handle).copied()
        }

        fn is_visible(&self, handle: u64) -> bool {
            self.markers.lock().unwrap().contains_key(&handle)
        }
    }

    #[derive(Default)]
    struct Ui {
        scores: Mutex<Vec<String>>,
        toasts: Mutex<Vec<String>>,
    }

    impl GameEventListener for Ui {
        fn on_score_changed(&self, _score: u32, text: String) {
            self.scores.lock().unwrap().push(text);
        }

        fn on_coin_collected(&self, message: String) {
            self.toasts.lock().unwrap().push(message);
        }
    }

    const PLAYER: LatLng = LatLng {
        latitude: 22.5431,
        longitude: 114.0579,
    };

    fn session() -> (GameSession, Arc<FakeMap>, Arc<Ui>) {
        let map = Arc::new(FakeMap::default());
        let ui = Arc::new(Ui::default());
        let session = GameSession::new(GameConfig::default(), map.clone(), ui.clone()).unwrap();
        (session, map, ui)
    }

    #[test]
    fn test_initial_score_is_announced() {
        let (session, map, ui) = session();

        assert_eq!(*ui.scores.lock().unwrap(), vec!["Score: 0".to_owned()]);
        assert_eq!(session.score_text().unwrap(), "Score: 0");
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_collecting_through_the_bindings() {
        let (session, map, ui) = session();

        let summary = session.on_location_change(Some(PLAYER)).unwrap();
        assert_eq!(summary.placed, 5);
        assert_eq!(summary.live_coins, 5);
        assert_eq!(map.len(), 5);

        // Put the first coin right under the player (about 3m north).
        map.move_marker(
            1,
            LatLng {
                latitude: PLAYER.latitude + 0.000_027,
                longitude: PLAYER.longitude,
            },
        );

        let summary = session.on_location_change(Some(PLAYER)).unwrap();
        assert_eq!(summary.collected, Some(1));
        assert_eq!(summary.score, 1);
        assert_eq!(summary.live_coins, 5);
        assert_eq!(map.len(), 5);
        assert!(map.marker_position(1).is_none());

        assert_eq!(
            *ui.scores.lock().unwrap(),
            vec!["Score: 0".to_owned(), "Score: 1".to_owned()]
        );
        assert_eq!(*ui.toasts.lock().unwrap(), vec!["Collected a coin!".to_owned()]);
    }

    #[test]
    fn test_no_fix_does_nothing() {
        let (session, map, _ui) = session();

        let summary = session.on_location_change(None).unwrap();

        assert_eq!(summary.placed, 0);
        assert_eq!(summary.live_coins, 0);
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_missing_icon_is_absorbed() {
        let map = Arc::new(FakeMap::default());
        let ui = Arc::new(Ui::default());
        let mut config = GameConfig::default();
        config.marker.icon = "gem".into();
        let session = GameSession::new(config, map.clone(), ui).unwrap();

        let summary = session.on_location_change(Some(PLAYER)).unwrap();

        assert_eq!(summary.placed, 0);
        assert!(session.live_coins().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_config() {
        let mut config = GameConfig::default();
        config.max_coins = 0;

        let result = GameSession::new(
            config,
            Arc::new(FakeMap::default()),
            Arc::new(Ui::default()),
        );
        assert!(matches!(result, Err(SessionError::InvalidConfig(_))));
    }

    #[test]
    fn test_huge_max_coins_is_rejected() {
        let mut config = GameConfig::default();
        config.max_coins = u32::MAX;

        let result = GameSession::new(
            config,
            Arc::new(FakeMap::default()),
            Arc::new(Ui::default()),
        );
        assert!(matches!(result, Err(SessionError::InvalidConfig(_))));
    }

    /// Reads the session back from inside its own callbacks.
    #[derive(Default)]
    struct QueryingUi {
        session: OnceLock<Weak<GameSession>>,
        seen: Mutex<Vec<(u32, String, usize)>>,
    }

    impl GameEventListener for QueryingUi {
        fn on_score_changed(&self, _score: u32, _text: String) {
            let Some(session) = self.session.get().and_then(Weak::upgrade) else {
                return;
            };
            self.seen.lock().unwrap().push((
                session.score().unwrap(),
                session.score_text().unwrap(),
                session.live_coins().unwrap().len(),
            ));
        }

        fn on_coin_collected(&self, _message: String) {}
    }

    #[test]
    fn test_listener_can_query_session_from_callback() {
        let map = Arc::new(FakeMap::default());
        let ui = Arc::new(QueryingUi::default());
        let session =
            Arc::new(GameSession::new(GameConfig::default(), map.clone(), ui.clone()).unwrap());
        ui.session.set(Arc::downgrade(&session)).unwrap();

        session.on_location_change(Some(PLAYER)).unwrap();
        map.move_marker(
            1,
            LatLng {
                latitude: PLAYER.latitude + 0.000_027,
                longitude: PLAYER.longitude,
            },
        );
        let summary = session.on_location_change(Some(PLAYER)).unwrap();
        assert_eq!(summary.collected, Some(1));

        assert_eq!(
            *ui.seen.lock().unwrap(),
            vec![(1, "Score: 1".to_owned(), 5)]
        );
    }

    #[test]
    fn test_dispose_clears_map() {
        let (session, map, _ui) = session();
        session.on_location_change(Some(PLAYER)).unwrap();
        assert_eq!(session.live_coins().unwrap().len(), 5);

        session.dispose().unwrap();

        assert_eq!(map.len(), 0);
        assert!(session.live_coins().unwrap().is_empty());
        assert_eq!(session.score().unwrap(), 0);
    }
}
