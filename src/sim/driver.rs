//! Tick driver with snapshot publishing
//!
//! The driver is the only writer of the simulation state. Readers (renderers,
//! loggers) get the snapshot published after the last completed batch and
//! never see a state mid-tick.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::CollisionResolver;
use super::diagnostics::Diagnostics;
use super::scheduler::StepScheduler;
use super::state::Game;
use super::tick::{TickInput, TickReport, advance};

/// Immutable copy of the state after a batch of ticks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Total ticks run since construction
    pub ticks: u64,
    pub game: Game,
}

impl Snapshot {
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::measure(&self.game)
    }
}

/// Owns the state, the scheduler and the collision strategy
#[derive(Debug)]
pub struct Simulation<R = Pcg32> {
    state: Game,
    scheduler: StepScheduler<R>,
    resolver: Box<dyn CollisionResolver>,
    ticks: u64,
    published: Snapshot,
}

impl<R: Rng> Simulation<R> {
    pub fn new(state: Game, scheduler: StepScheduler<R>, resolver: Box<dyn CollisionResolver>) -> Self {
        let published = Snapshot {
            ticks: 0,
            game: state.clone(),
        };
        log::info!(
            "Simulation ready: {} bodies, dt={}, dx={}, resolver={:?}",
            state.bodies.len(),
            state.dt,
            state.dx,
            resolver
        );
        Self {
            state,
            scheduler,
            resolver,
            ticks: 0,
            published,
        }
    }

    /// Advance by `elapsed` wall-clock seconds and publish the result
    ///
    /// `input` is applied whole to every tick in the batch.
    pub fn advance(&mut self, elapsed: f64, input: &TickInput) -> &Snapshot {
        let amount = elapsed / self.state.dt;

        let resolver = self.resolver.as_ref();
        let mut ran = 0u64;
        let mut report = TickReport::default();
        let state = self.scheduler.run(amount, &mut self.state, |steps, state| {
            report += advance(state, steps, input, resolver);
            ran += steps.max(0) as u64;
            state
        });

        self.ticks += ran;
        log::debug!(
            "Ran {ran} ticks for {elapsed:.4}s ({} wall bounces, {} contacts)",
            report.wall_bounces,
            report.contacts
        );

        self.published = Snapshot {
            ticks: self.ticks,
            game: state.clone(),
        };
        &self.published
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> &Snapshot {
        &self.published
    }

    /// Diagnostics of the latest published snapshot
    pub fn diagnostics(&self) -> Diagnostics {
        self.published.diagnostics()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::SweepResolver;
    use crate::sim::state::Body;
    use glam::{DVec2, IVec2};

    fn simulation(bodies: Vec<Body>) -> Simulation {
        let game = Game::new(0.01, 0.1, 0.0, IVec2::new(800, 600), bodies).unwrap();
        Simulation::new(game, StepScheduler::seeded(1), Box::new(SweepResolver))
    }

    #[test]
    fn test_whole_steps_are_exact() {
        let body = Body::moving(5.0, DVec2::new(100.0, 100.0), DVec2::new(1.0, 0.0));
        let mut sim = simulation(vec![body]);
        let input = TickInput::new(IVec2::new(800, 600));

        let snapshot = sim.advance(0.05, &input);
        assert_eq!(snapshot.ticks, 5);
        assert!((snapshot.game.bodies[0].center.x.q - 100.5).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_only_changes_on_advance() {
        let body = Body::moving(5.0, DVec2::new(100.0, 100.0), DVec2::new(1.0, 0.0));
        let mut sim = simulation(vec![body]);
        let initial = sim.snapshot().clone();
        assert_eq!(initial.ticks, 0);

        sim.advance(0.1, &TickInput::new(IVec2::new(640, 480)));
        let published = sim.snapshot();
        assert_eq!(published.ticks, 10);
        assert_eq!(published.game.bounds, IVec2::new(640, 480));
        assert_ne!(published.game, initial.game);
    }

    #[test]
    fn test_average_rate_tracks_wall_clock() {
        let mut sim = simulation(Vec::new());
        let input = TickInput::new(IVec2::new(800, 600));
        for _ in 0..4000 {
            sim.advance(0.025, &input);
        }
        // 2.5 ticks per call on average
        let rate = sim.ticks() as f64 / 4000.0;
        assert!((rate - 2.5).abs() < 0.05, "rate {rate}");
    }

    #[test]
    fn test_degenerate_viewport_keeps_bounds() {
        let mut sim = simulation(Vec::new());
        let snapshot = sim.advance(0.01, &TickInput::new(IVec2::new(0, 0)));
        assert_eq!(snapshot.game.bounds, IVec2::new(800, 600));
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let body = Body::moving(5.0, DVec2::new(100.0, 100.0), DVec2::ZERO);
        let mut sim = simulation(vec![body]);
        let snapshot = sim.advance(0.02, &TickInput::new(IVec2::new(800, 600)));

        let json = serde_json::to_value(snapshot).unwrap();
        assert_eq!(json["ticks"], 2);
        assert_eq!(json["game"]["bodies"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_diagnostics_of_published_state() {
        let body = Body::moving(5.0, DVec2::new(100.0, 100.0), DVec2::new(3.0, 4.0));
        let mut sim = simulation(vec![body]);
        sim.advance(0.01, &TickInput::new(IVec2::new(800, 600)));
        let diagnostics = sim.diagnostics();
        assert_eq!(diagnostics.kinetic, 12.5);
        assert_eq!(diagnostics.momentum, DVec2::new(3.0, 4.0));
    }
}
