//! Geometric algebra for bodies and walls
//!
//! Vectors are glam's `DVec2` / `IVec2`. On top of them:
//! - magnitude is the *squared* length everywhere; only `unit` takes a root
//! - `Range` is a 1D interval that may be transiently inverted (swept extents)
//! - `BoundingBox` is a pair of ranges, `Circle` a radius around any center type

use std::ops::Sub;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Dot product
#[inline]
pub fn dot(a: DVec2, b: DVec2) -> f64 {
    a.dot(b)
}

/// Squared length of a vector
#[inline]
pub fn magnitude(v: DVec2) -> f64 {
    v.length_squared()
}

/// Scale a vector to unit length
///
/// Fails for the zero vector, and for vectors whose length is not
/// representable, rather than returning NaN or zero components.
pub fn unit(v: DVec2) -> Result<DVec2, GeometryError> {
    v.try_normalize().ok_or(GeometryError::Unnormalizable { x: v.x, y: v.y })
}

/// Projection of `v` onto `direction` (assumed unit length)
#[inline]
pub fn along(v: DVec2, direction: DVec2) -> DVec2 {
    direction * dot(v, direction)
}

fn min_of<T: PartialOrd>(left: T, right: T) -> T {
    if left < right { left } else { right }
}

fn max_of<T: PartialOrd>(left: T, right: T) -> T {
    if left < right { right } else { left }
}

/// A 1D interval `[start, end]`
///
/// No ordering is enforced; `start > end` is a valid (empty) interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range<T> {
    pub start: T,
    pub end: T,
}

impl<T: PartialOrd + Copy> Range<T> {
    pub fn new(start: T, end: T) -> Self {
        Self { start, end }
    }

    /// Smallest interval containing both
    pub fn span(&self, other: &Self) -> Self {
        Self {
            start: min_of(self.start, other.start),
            end: max_of(self.end, other.end),
        }
    }

    /// Overlap of both intervals, `None` if they are disjoint
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = max_of(self.start, other.start);
        let end = min_of(self.end, other.end);

        if end < start {
            return None;
        }

        Some(Self { start, end })
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.intersection(other).is_some()
    }

    /// Span of both intervals, only defined when they overlap
    pub fn union(&self, other: &Self) -> Option<Self> {
        if self.intersects(other) {
            Some(self.span(other))
        } else {
            None
        }
    }

    /// Open-interval membership: touching an endpoint does not count
    pub fn contains(&self, element: T) -> bool {
        self.start < element && element < self.end
    }

    /// Cut the interval at `element`
    pub fn split(&self, element: T) -> (Self, Self) {
        (
            Self {
                start: self.start,
                end: element,
            },
            Self {
                start: element,
                end: self.end,
            },
        )
    }

    pub fn size(&self) -> T
    where
        T: Sub<Output = T>,
    {
        self.end - self.start
    }
}

impl Range<f64> {
    /// Linear interpolation: 0 → start, 1 → end
    #[inline]
    pub fn interpolate(&self, f: f64) -> f64 {
        (1.0 - f) * self.start + f * self.end
    }
}

impl Range<i32> {
    /// Linear interpolation rounded to the nearest integer (ties to even)
    #[inline]
    pub fn interpolate(&self, f: f64) -> i32 {
        ((1.0 - f) * self.start as f64 + f * self.end as f64).round_ties_even() as i32
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox<T> {
    pub horizontal: Range<T>,
    pub vertical: Range<T>,
}

/// A circle of `radius` around a center of any coordinate type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle<C> {
    pub radius: f64,
    pub center: C,
}

impl<C> Circle<C> {
    pub fn new(radius: f64, center: C) -> Self {
        Self { radius, center }
    }

    /// Same radius, transformed center
    pub fn map<D>(&self, select: impl FnOnce(&C) -> D) -> Circle<D> {
        Circle {
            radius: self.radius,
            center: select(&self.center),
        }
    }
}

impl Circle<DVec2> {
    /// Axis-aligned box enclosing the circle
    pub fn bounding_box(&self) -> BoundingBox<f64> {
        BoundingBox {
            horizontal: Range::new(self.center.x - self.radius, self.center.x + self.radius),
            vertical: Range::new(self.center.y - self.radius, self.center.y + self.radius),
        }
    }
}
