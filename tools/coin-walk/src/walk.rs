use coin_field_core::{prelude::*, spatial::haversine_distance};
use geo::{Bearing, Destination, Haversine, Point};
use rand::Rng;

/// Parameters of one simulated walk.
#[derive(Debug, Clone)]
pub struct WalkPlan {
    pub start: Point,
    pub steps: usize,
    pub step_m: f64,
    /// Chance per step that the positioning source has no fix.
    pub dropout: f64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct WalkReport {
    pub readings: usize,
    pub missed_fixes: usize,
    pub collected: u32,
    pub placed: usize,
    pub distance_m: f64,
    pub final_position: Option<Point>,
}

/// Walk toward the nearest live coin, one reading per step.
pub fn simulate<R, W>(
    plan: &WalkPlan,
    controller: &mut CoinFieldController<MarkerId, R>,
    surface: &mut InMemorySurface,
    walker: &mut W,
) -> WalkReport
where
    R: Rng,
    W: Rng,
{
    let mut events = RecordedEvents::default();
    let mut report = WalkReport::default();
    let mut player = plan.start;

    for step in 0..plan.steps {
        report.readings += 1;

        let reading = if walker.random::<f64>() < plan.dropout {
            report.missed_fixes += 1;
            None
        } else {
            Some(player)
        };

        let outcome = controller.on_position_update(surface, &mut events, reading);
        report.placed += outcome.placed;

        if let Some(coin) = outcome.collected {
            tracing::info!(
                step,
                handle = %coin.handle,
                score = controller.score().value(),
                "picked up coin"
            );
        }

        let Some(target) = nearest_coin(controller, player) else {
            continue;
        };

        let remaining = haversine_distance(player, target);
        let stride = plan.step_m.min(remaining);
        if stride > 0.0 {
            let bearing = Haversine.bearing(player, target);
            player = Haversine.destination(player, bearing, stride);
            report.distance_m += stride;
        }
    }

    report.collected = controller.score().value();
    report.final_position = Some(player);
    report
}

fn nearest_coin<R: Rng>(controller: &CoinFieldController<MarkerId, R>, player: Point) -> Option<Point> {
    controller
        .field()
        .iter()
        .map(|coin| coin.position)
        .min_by(|a, b| {
            haversine_distance(player, *a).total_cmp(&haversine_distance(player, *b))
        })
}
