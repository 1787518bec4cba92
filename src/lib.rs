//! Vortex Sim - a small fixed-step particle simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, physics step, scheduling, diagnostics)
//! - `config`: Data-driven simulation setup loaded from JSON
//! - `error`: Error types shared across the crate

pub mod config;
pub mod error;
pub mod sim;

pub use config::{BodyConfig, ResolverKind, SimConfig};
pub use error::{ConfigError, GeometryError};

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulated seconds per step
    pub const DEFAULT_DT: f64 = 1.0 / 100.0;
    /// Position units per unit of velocity·dt
    pub const DEFAULT_DX: f64 = 1.0 / 10.0;
    /// Default y-acceleration (zero: bodies drift freely)
    pub const DEFAULT_GRAVITY: f64 = 0.0;

    /// Default viewport used before the host reports its size
    pub const DEFAULT_VIEWPORT: (i32, i32) = (800, 600);

    /// Strength of the inverse-square attraction toward the vortex.
    /// Tuned against the fixed step rate, so it is applied without dt.
    pub const VORTEX_STRENGTH: f64 = 1000.0;

    /// Number of bodies in the default roster
    pub const DEFAULT_BODY_COUNT: usize = 20;
}
