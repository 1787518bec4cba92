//! Fixed timestep simulation tick
//!
//! One tick advances every body by a single step of `dt`:
//! 1. Apply host input (viewport bounds, vortex)
//! 2. Integrate each body and bounce it off the low and high walls
//! 3. Resolve body-body contacts
//! 4. Accumulate gravity and vortex attraction into velocities

use glam::IVec2;

use super::collision::{CollisionResolver, collide_walls};
use super::geometry::{magnitude, unit};
use super::state::{Body, Game, check_bounds};
use crate::consts::VORTEX_STRENGTH;

/// Host input for a single tick
///
/// Applied whole at the start of the tick, so a tick never sees a
/// half-updated viewport or vortex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInput {
    /// Current viewport size (width, height)
    pub viewport: IVec2,
    /// Attractor position while the pointer is held, `None` otherwise
    pub vortex: Option<IVec2>,
}

impl TickInput {
    pub fn new(viewport: IVec2) -> Self {
        Self {
            viewport,
            vortex: None,
        }
    }
}

/// What happened during a tick (for logging and tests)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Bodies that bounced off a wall (counted once per barrier hit)
    pub wall_bounces: usize,
    /// Body pairs that exchanged momentum
    pub contacts: usize,
}

impl std::ops::AddAssign for TickReport {
    fn add_assign(&mut self, other: Self) {
        self.wall_bounces += other.wall_bounces;
        self.contacts += other.contacts;
    }
}

/// Advance the game state by one fixed timestep
///
/// A viewport with a non-positive dimension (e.g. a minimized window) is
/// ignored and the previous bounds are kept.
pub fn tick(state: &mut Game, input: &TickInput, resolver: &dyn CollisionResolver) -> TickReport {
    match check_bounds(input.viewport) {
        Ok(()) => state.bounds = input.viewport,
        Err(err) => log::warn!("Keeping bounds {}: {err}", state.bounds),
    }
    state.vortex = input.vortex;

    let mut report = TickReport::default();

    let (dt, dx, bounds) = (state.dt, state.dx, state.bounds);
    for body in &mut state.bodies {
        let before = body.extent();

        body.center.x.q += body.center.x.vq * dt / dx;
        body.center.y.q += body.center.y.vq * dt / dx;

        if collide_walls(body, &before, IVec2::ZERO) {
            report.wall_bounces += 1;
        }
        if collide_walls(body, &before, bounds) {
            report.wall_bounces += 1;
        }
    }

    report.contacts = resolver.resolve(&mut state.bodies);

    apply_forces(state);

    report
}

/// Run `steps` ticks with the same input
///
/// Negative counts (a clock running backwards) are ignored; the simulation
/// cannot be integrated in reverse.
pub fn advance(
    state: &mut Game,
    steps: i64,
    input: &TickInput,
    resolver: &dyn CollisionResolver,
) -> TickReport {
    let mut report = TickReport::default();

    if steps < 0 {
        log::warn!("Ignoring request to run {steps} steps");
        return report;
    }

    for _ in 0..steps {
        report += tick(state, input, resolver);
    }

    report
}

/// Gravity and vortex attraction
fn apply_forces(state: &mut Game) {
    let gravity_step = state.gravity * state.dt;
    let vortex = state.vortex;

    for body in &mut state.bodies {
        body.center.y.vq += gravity_step;

        if let Some(vortex) = vortex {
            apply_vortex(body, vortex);
        }
    }
}

/// Inverse-square pull toward `vortex`, added straight to velocity
fn apply_vortex(body: &mut Body, vortex: IVec2) {
    let radial = vortex.as_dvec2() - body.position();

    let direction = match unit(radial) {
        Ok(direction) => direction,
        Err(err) => {
            log::warn!("Body sits on the vortex, skipping attraction: {err}");
            return;
        }
    };

    let acceleration = direction * (VORTEX_STRENGTH / magnitude(radial));
    body.center.x.vq += acceleration.x;
    body.center.y.vq += acceleration.y;
}
