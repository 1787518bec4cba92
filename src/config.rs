//! Simulation configuration
//!
//! Loaded from JSON; every field is optional and falls back to the default
//! 20-body scene.

use std::path::Path;

use glam::{DVec2, IVec2};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{Body, CollisionResolver, Game, SeparatingResolver, Simulation, StepScheduler, SweepResolver};

/// Pairwise collision strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    /// Single sweep, velocity swap only
    #[default]
    Sweep,
    /// Single sweep, velocity swap plus push-apart
    Separating,
}

impl ResolverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolverKind::Sweep => "sweep",
            ResolverKind::Separating => "separating",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sweep" => Some(ResolverKind::Sweep),
            "separating" | "separate" => Some(ResolverKind::Separating),
            _ => None,
        }
    }

    pub fn resolver(&self) -> Box<dyn CollisionResolver> {
        match self {
            ResolverKind::Sweep => Box::new(SweepResolver),
            ResolverKind::Separating => Box::new(SeparatingResolver),
        }
    }
}

/// Initial state of one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub radius: f64,
    pub position: DVec2,
    pub velocity: DVec2,
}

impl BodyConfig {
    pub fn to_body(&self) -> Body {
        Body::moving(self.radius, self.position, self.velocity)
    }
}

/// Reference scene: a 5×4 grid of bodies with growing radii
pub fn default_roster() -> Vec<BodyConfig> {
    (0..DEFAULT_BODY_COUNT)
        .map(|i| BodyConfig {
            radius: 5.0 + i as f64,
            position: DVec2::new(((1 + i % 5) * 100) as f64, ((1 + i / 5) * 100) as f64),
            velocity: DVec2::new(10.0, i as f64),
        })
        .collect()
}

/// Simulation setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Simulated seconds per step
    pub dt: f64,
    /// Position units per unit of velocity·dt
    pub dx: f64,
    /// Y-acceleration per second
    pub gravity: f64,
    /// Seed for the step scheduler's random stream
    pub seed: u64,
    /// Viewport assumed until the host reports one
    pub viewport: IVec2,
    /// Pairwise collision strategy
    pub resolver: ResolverKind,
    /// Initial roster, in iteration order
    pub bodies: Vec<BodyConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            dx: DEFAULT_DX,
            gravity: DEFAULT_GRAVITY,
            seed: 0,
            viewport: IVec2::new(DEFAULT_VIEWPORT.0, DEFAULT_VIEWPORT.1),
            resolver: ResolverKind::Sweep,
            bodies: default_roster(),
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded config from {} ({} bodies)",
            path.display(),
            config.bodies.len()
        );
        Ok(config)
    }

    /// Reject configs that would break the simulation invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_game().map(|_| ())
    }

    /// Initial simulation state
    pub fn build_game(&self) -> Result<Game, ConfigError> {
        let bodies = self.bodies.iter().map(BodyConfig::to_body).collect();
        Game::new(self.dt, self.dx, self.gravity, self.viewport, bodies)
    }

    /// Ready-to-run driver with a seeded scheduler
    pub fn build_simulation(&self) -> Result<Simulation, ConfigError> {
        let game = self.build_game()?;
        Ok(Simulation::new(
            game,
            StepScheduler::seeded(self.seed),
            self.resolver.resolver(),
        ))
    }
}
