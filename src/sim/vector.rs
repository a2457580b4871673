//! Immutable 2D vector used for positions, velocities and forces
//!
//! Magnitudes are quantized to the nearest integer, matching how the race
//! protocol reports distances. Direction math (`normalize`, `angle_between`)
//! uses the exact Euclidean length so unit vectors stay unit.

use std::ops::{Add, Neg, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// A 2D vector value. Every operation returns a new vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D(DVec2);

impl Vector2D {
    pub const ZERO: Self = Self(DVec2::ZERO);

    pub const fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    #[inline]
    pub fn x(self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn as_dvec2(self) -> DVec2 {
        self.0
    }

    pub fn scale(self, by: f64) -> Self {
        Self(self.0 * by)
    }

    /// Component-wise division. Dividing by zero is an error, never ±∞/NaN.
    pub fn divide(self, by: f64) -> Result<Self> {
        if by == 0.0 {
            return Err(SimError::DivisionByZero);
        }
        Ok(Self(self.0 / by))
    }

    /// Euclidean norm rounded to the nearest integer
    pub fn magnitude(self) -> f64 {
        self.0.length().round()
    }

    /// Unrounded Euclidean norm
    #[inline]
    pub fn length(self) -> f64 {
        self.0.length()
    }

    /// Unit vector in the same direction; the zero vector comes back unchanged
    pub fn normalize(self) -> Self {
        Self(self.0.normalize_or_zero())
    }

    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.0.dot(other.0)
    }

    /// Unsigned angle between two vectors in radians, in [0, π]
    pub fn angle_between(self, other: Self) -> Result<f64> {
        let denom = self.length() * other.length();
        if denom == 0.0 {
            return Err(SimError::DegenerateVector);
        }
        Ok((self.dot(other) / denom).clamp(-1.0, 1.0).acos())
    }

    /// Caps the magnitude at `max`, preserving direction
    pub fn limit(self, max: f64) -> Self {
        if self.magnitude() > max {
            self.normalize().scale(max)
        } else {
            self
        }
    }

    /// Direction angle, `atan2(y, x)`
    pub fn heading(self) -> f64 {
        self.0.y.atan2(self.0.x)
    }

    /// Rounded distance to another point
    pub fn distance(self, other: Self) -> f64 {
        (self - other).magnitude()
    }

    /// Replace a single component, used for wall reflection
    pub(crate) fn with_x(self, x: f64) -> Self {
        Self::new(x, self.0.y)
    }

    pub(crate) fn with_y(self, y: f64) -> Self {
        Self::new(self.0.x, y)
    }
}

impl From<DVec2> for Vector2D {
    fn from(v: DVec2) -> Self {
        Self(v)
    }
}

impl From<(f64, f64)> for Vector2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}
