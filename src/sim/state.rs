//! Simulation state and body types
//!
//! The body roster is fixed at construction; its order is each body's identity
//! for the pairwise collision pass and must not change between ticks.

use std::time::Duration;

use glam::{DVec2, IVec2};
use serde::{Deserialize, Serialize};

use super::geometry::{BoundingBox, Circle};
use crate::error::ConfigError;

/// Position and velocity along one axis
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub q: f64,
    pub vq: f64,
}

impl Coordinate {
    pub fn new(q: f64, vq: f64) -> Self {
        Self { q, vq }
    }
}

/// Per-axis phase of a body
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Particle {
    pub x: Coordinate,
    pub y: Coordinate,
}

impl Particle {
    pub fn new(position: DVec2, velocity: DVec2) -> Self {
        Self {
            x: Coordinate::new(position.x, velocity.x),
            y: Coordinate::new(position.y, velocity.y),
        }
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x.q, self.y.q)
    }

    #[inline]
    pub fn velocity(&self) -> DVec2 {
        DVec2::new(self.x.vq, self.y.vq)
    }

    #[inline]
    pub fn set_velocity(&mut self, velocity: DVec2) {
        self.x.vq = velocity.x;
        self.y.vq = velocity.y;
    }
}

/// A simulated circular body
pub type Body = Circle<Particle>;

impl Circle<Particle> {
    /// Create a body from position and velocity vectors
    pub fn moving(radius: f64, position: DVec2, velocity: DVec2) -> Self {
        Circle::new(radius, Particle::new(position, velocity))
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        self.center.position()
    }

    #[inline]
    pub fn velocity(&self) -> DVec2 {
        self.center.velocity()
    }

    /// Bounding box of the body's current position
    pub fn extent(&self) -> BoundingBox<f64> {
        self.map(Particle::position).bounding_box()
    }
}

/// Complete simulation state
///
/// Only built through [`Game::new`], which enforces the invariants, so it is
/// serialized for snapshots but never deserialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Game {
    /// Simulated seconds per step
    pub dt: f64,
    /// Position units per unit of velocity·dt
    pub dx: f64,
    /// Y-acceleration applied every step
    pub gravity: f64,
    /// Viewport size, refreshed from the host at the start of every step
    pub bounds: IVec2,
    /// Attractor position, if active
    pub vortex: Option<IVec2>,
    /// Bodies in roster order
    pub bodies: Vec<Body>,
}

impl Game {
    /// Create a validated game state
    pub fn new(
        dt: f64,
        dx: f64,
        gravity: f64,
        bounds: IVec2,
        bodies: Vec<Body>,
    ) -> Result<Self, ConfigError> {
        check_positive("dt", dt)?;
        if Duration::try_from_secs_f64(dt).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "dt".to_string(),
                value: dt,
                requirement: "representable as a Duration",
            });
        }
        check_positive("dx", dx)?;
        if !gravity.is_finite() {
            return Err(ConfigError::not_finite("gravity", gravity));
        }
        check_bounds(bounds)?;

        for (i, body) in bodies.iter().enumerate() {
            check_positive(format!("bodies[{i}].radius"), body.radius)?;
            let (p, v) = (body.position(), body.velocity());
            if let Some(bad) = [p.x, p.y, v.x, v.y].into_iter().find(|c| !c.is_finite()) {
                return Err(ConfigError::not_finite(format!("bodies[{i}] motion"), bad));
            }
        }

        Ok(Self {
            dt,
            dx,
            gravity,
            bounds,
            vortex: None,
            bodies,
        })
    }
}

fn check_positive(field: impl Into<String>, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::not_positive(field, value))
    }
}

/// Reject a viewport with a non-positive dimension
pub fn check_bounds(bounds: IVec2) -> Result<(), ConfigError> {
    check_positive("bounds.x", bounds.x as f64)?;
    check_positive("bounds.y", bounds.y as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_body() -> Vec<Body> {
        vec![Body::moving(5.0, DVec2::new(10.0, 20.0), DVec2::new(1.0, -2.0))]
    }

    #[test]
    fn test_game_new_valid() {
        let game = Game::new(0.01, 0.1, 0.0, IVec2::new(800, 600), one_body()).unwrap();
        assert_eq!(game.bodies.len(), 1);
        assert!(game.vortex.is_none());
        assert_eq!(game.bodies[0].position(), DVec2::new(10.0, 20.0));
        assert_eq!(game.bodies[0].velocity(), DVec2::new(1.0, -2.0));
    }

    #[test]
    fn test_game_new_rejects_bad_values() {
        let bounds = IVec2::new(800, 600);
        assert!(Game::new(0.0, 0.1, 0.0, bounds, one_body()).is_err());
        assert!(Game::new(0.01, -1.0, 0.0, bounds, one_body()).is_err());
        assert!(Game::new(0.01, 0.1, f64::NAN, bounds, one_body()).is_err());
        assert!(Game::new(0.01, 0.1, 0.0, IVec2::new(0, 600), one_body()).is_err());

        let err = Game::new(1e20, 0.1, 0.0, bounds, one_body()).unwrap_err();
        assert!(err.to_string().contains("representable as a Duration"));

        let flat = vec![Body::moving(0.0, DVec2::ZERO, DVec2::ZERO)];
        let err = Game::new(0.01, 0.1, 0.0, bounds, flat).unwrap_err();
        assert!(err.to_string().contains("bodies[0].radius"));
    }

    #[test]
    fn test_body_extent() {
        let body = Body::moving(5.0, DVec2::new(10.0, 10.0), DVec2::ZERO);
        let extent = body.extent();
        assert_eq!(extent.horizontal.start, 5.0);
        assert_eq!(extent.vertical.end, 15.0);
    }

    #[test]
    fn test_set_velocity() {
        let mut particle = Particle::new(DVec2::new(1.0, 2.0), DVec2::ZERO);
        particle.set_velocity(DVec2::new(-3.0, 4.0));
        assert_eq!(particle.x.vq, -3.0);
        assert_eq!(particle.y.vq, 4.0);
        assert_eq!(particle.position(), DVec2::new(1.0, 2.0));
    }
}
