//! Energy and momentum accumulators
//!
//! Read-only queries over a state, used for the status log line and as test
//! oracles for the physics step.

use std::fmt;

use glam::DVec2;
use serde::Serialize;

use super::geometry::magnitude;
use super::state::Game;

/// Sum of `|v|² / 2` over all bodies (unit mass)
pub fn kinetic_energy(state: &Game) -> f64 {
    state
        .bodies
        .iter()
        .map(|body| magnitude(body.velocity()) / 2.0)
        .sum()
}

/// Sum of `gravity · height · dx`, height measured up from the bottom edge
pub fn potential_energy(state: &Game) -> f64 {
    let floor = state.bounds.y as f64;
    state
        .bodies
        .iter()
        .map(|body| state.gravity * (floor - body.center.y.q) * state.dx)
        .sum()
}

/// Vector sum of all body velocities
pub fn momentum(state: &Game) -> DVec2 {
    state.bodies.iter().map(|body| body.velocity()).sum()
}

/// All diagnostics measured at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Diagnostics {
    pub kinetic: f64,
    pub potential: f64,
    pub momentum: DVec2,
}

impl Diagnostics {
    pub fn measure(state: &Game) -> Self {
        Self {
            kinetic: kinetic_energy(state),
            potential: potential_energy(state),
            momentum: momentum(state),
        }
    }

    /// Kinetic plus potential
    pub fn total_energy(&self) -> f64 {
        self.kinetic + self.potential
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "energy {:.3} = {:.3} + {:.3}, momentum ({:.3}, {:.3})",
            self.total_energy(),
            self.kinetic,
            self.potential,
            self.momentum.x,
            self.momentum.y
        )
    }
}
