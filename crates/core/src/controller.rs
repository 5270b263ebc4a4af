//! The coin lifecycle.
//!
//! [`CoinFieldController`] owns the live coins and the score. Every position
//! reading runs one cycle: collect at most one coin in range, then top the
//! field back up to `max_coins` around the player.

use geo::Point;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    coin::{Coin, CoinField, Score},
    config::CoinFieldConfig,
    error::ConfigError,
    spatial::{random_point_near, surface_distance},
    surface::{GameEvents, LocationListener, MapSurface, MarkerStyle},
};

/// What a single position update did.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateOutcome<H> {
    pub collected: Option<Coin<H>>,
    /// Coins successfully placed during this update, backfill included.
    pub placed: usize,
}

impl<H> UpdateOutcome<H> {
    fn idle() -> Self {
        Self {
            collected: None,
            placed: 0,
        }
    }
}

pub struct CoinFieldController<H, R = StdRng> {
    config: CoinFieldConfig,
    style: MarkerStyle,
    field: CoinField<H>,
    score: Score,
    rng: R,
}

impl<H> CoinFieldController<H, StdRng>
where
    H: Clone + std::fmt::Debug,
{
    /// Controller seeded from the operating system's entropy source.
    pub fn from_entropy(config: CoinFieldConfig) -> Result<Self, ConfigError> {
        Self::new(config, StdRng::from_os_rng())
    }
}

impl<H, R> CoinFieldController<H, R>
where
    H: Clone + std::fmt::Debug,
    R: Rng,
{
    pub fn new(config: CoinFieldConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            field: CoinField::new(config.max_coins),
            config,
            style: MarkerStyle::default(),
            score: Score::ZERO,
            rng,
        })
    }

    pub fn with_style(mut self, style: MarkerStyle) -> Self {
        self.style = style;
        self
    }

    pub fn config(&self) -> &CoinFieldConfig {
        &self.config
    }

    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }

    pub fn field(&self) -> &CoinField<H> {
        &self.field
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Push the current score to the UI, e.g. right after it is created.
    pub fn announce_score<E>(&self, events: &mut E)
    where
        E: GameEvents<H> + ?Sized,
    {
        events.score_changed(self.score);
    }

    /// Drop up to `count` new coins at random spots around `center`.
    ///
    /// `count` is capped at the field's free space. Placements the surface
    /// rejects are logged and skipped; the next update tries again.
    pub fn refill<S>(&mut self, surface: &mut S, center: Point, count: usize) -> usize
    where
        S: MapSurface<Handle = H> + ?Sized,
    {
        let count = count.min(self.field.shortfall());
        let radius_deg = self.config.spawn_radius_deg();
        let mut placed = 0;

        for _ in 0..count {
            let position = random_point_near(center, radius_deg, &mut self.rng);

            match surface.place_marker(position, &self.style) {
                Ok(handle) => {
                    tracing::debug!(?handle, x = position.x(), y = position.y(), "placed coin");
                    // Cannot overflow: count never exceeds the shortfall.
                    let _ = self.field.push(Coin::new(handle, position));
                    placed += 1;
                }
                Err(error) => {
                    tracing::warn!(%error, "coin placement failed");
                }
            }
        }

        placed
    }

    /// Run one cycle for a position reading. `None` (no fix) does nothing.
    pub fn on_position_update<S, E>(
        &mut self,
        surface: &mut S,
        events: &mut E,
        position: Option<Point>,
    ) -> UpdateOutcome<H>
    where
        S: MapSurface<Handle = H> + ?Sized,
        E: GameEvents<H> + ?Sized,
    {
        let Some(position) = position else {
            return UpdateOutcome::idle();
        };

        let mut outcome = UpdateOutcome::idle();

        if let Some(index) = self.first_in_range(surface, position) {
            if let Some(coin) = self.field.remove(index) {
                surface.remove_marker(&coin.handle);
                self.score.increment();

                tracing::info!(handle = ?coin.handle, score = self.score.value(), "coin collected");
                events.score_changed(self.score);
                events.coin_collected(&coin, self.score);

                outcome.placed += self.refill(surface, position, 1);
                outcome.collected = Some(coin);
            }
        }

        let shortfall = self.field.shortfall();
        if shortfall > 0 {
            outcome.placed += self.refill(surface, position, shortfall);
        }

        outcome
    }

    /// Remove every live coin from the surface. The score is kept.
    pub fn clear<S>(&mut self, surface: &mut S)
    where
        S: MapSurface<Handle = H> + ?Sized,
    {
        for coin in self.field.drain() {
            surface.remove_marker(&coin.handle);
        }
    }

    // Insertion order decides ties, not distance.
    fn first_in_range<S>(&self, surface: &S, position: Point) -> Option<usize>
    where
        S: MapSurface<Handle = H> + ?Sized,
    {
        let metric = self.config.distance_metric;
        let radius = self.config.collection_radius_m;

        self.field.iter().position(|coin| {
            surface.is_visible(&coin.handle)
                && surface
                    .marker_position(&coin.handle)
                    .is_some_and(|p| surface_distance(metric, position, p) < radius)
        })
    }
}

impl<S, R> LocationListener<S> for CoinFieldController<S::Handle, R>
where
    S: MapSurface,
    R: Rng,
{
    fn on_location_change(
        &mut self,
        surface: &mut S,
        events: &mut dyn GameEvents<S::Handle>,
        position: Option<Point>,
    ) {
        self.on_position_update(surface, events, position);
    }
}
