//! Deterministic simulation module
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, injected into the scheduler
//! - Stable iteration order (roster order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod diagnostics;
pub mod driver;
pub mod geometry;
pub mod scheduler;
pub mod state;
pub mod tick;

pub use collision::{CollisionResolver, Contact, SeparatingResolver, SweepResolver, collide_bodies, collide_walls};
pub use diagnostics::{Diagnostics, kinetic_energy, momentum, potential_energy};
pub use driver::{Simulation, Snapshot};
pub use geometry::{BoundingBox, Circle, Range, along, dot, magnitude, unit};
pub use scheduler::{SplitAmount, StepScheduler, split_amount};
pub use state::{Body, Coordinate, Game, Particle};
pub use tick::{TickInput, TickReport, advance, tick};
