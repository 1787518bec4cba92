//! Error types for geometry and configuration.

use thiserror::Error;

/// Errors raised by the geometric algebra.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// Normalizing a vector with zero or non-finite length.
    #[error("cannot normalize vector ({x}, {y})")]
    Unnormalizable {
        /// Horizontal component of the offending vector.
        x: f64,
        /// Vertical component of the offending vector.
        y: f64,
    },
}

/// Errors raised while loading or validating a simulation config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric field is out of its allowed domain.
    #[error("invalid {field}: {value} (must be {requirement})")]
    InvalidValue {
        /// Name of the offending field.
        field: String,
        /// Value that was rejected.
        value: f64,
        /// Human-readable requirement.
        requirement: &'static str,
    },

    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for [`crate::SimConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates an invalid value error for a field that must be strictly positive.
    pub fn not_positive(field: impl Into<String>, value: f64) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value,
            requirement: "finite and > 0",
        }
    }

    /// Creates an invalid value error for a field that must be finite.
    pub fn not_finite(field: impl Into<String>, value: f64) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value,
            requirement: "finite",
        }
    }
}
