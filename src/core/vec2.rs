//! 2D Vector and Arena Bounds
//!
//! Plain f64 vector operations for game physics. Every normalization is
//! zero-safe: a zero-length input yields the zero vector instead of NaN.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// 2D vector with f64 components.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
}

impl Vec2 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector for a heading angle in radians.
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        Self {
            x: angle.cos(),
            y: angle.sin(),
        }
    }

    /// Squared length (avoids sqrt - prefer this for comparisons).
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Length (magnitude).
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Squared distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Self) -> f64 {
        (self - other).length_squared()
    }

    /// Distance to another point. Prefer `distance_squared` when possible.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Normalize to unit length. Returns ZERO if length is zero.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return Self::ZERO;
        }
        Self {
            x: self.x / len,
            y: self.y / len,
        }
    }

    /// Rescale to the given magnitude. Returns ZERO for zero-length input.
    #[inline]
    pub fn with_magnitude(self, mag: f64) -> Self {
        self.normalize() * mag
    }

    /// Clamp magnitude to `max`. Shorter vectors pass through unchanged.
    #[inline]
    pub fn limit(self, max: f64) -> Self {
        let len_sq = self.length_squared();
        if len_sq > max * max {
            self.with_magnitude(max)
        } else {
            self
        }
    }

    /// Heading angle in radians. Zero vector reports 0.0.
    #[inline]
    pub fn heading(self) -> f64 {
        if self == Self::ZERO {
            0.0
        } else {
            self.y.atan2(self.x)
        }
    }

    /// Dot product with another vector.
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Linear interpolation: t = 0 returns self, t = 1 returns other.
    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl fmt::Debug for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec2({:.3}, {:.3})", self.x, self.y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Linear remap of `value` from `[in_lo, in_hi]` to `[out_lo, out_hi]`.
///
/// Degenerate input ranges collapse to `out_lo` instead of dividing by zero.
#[inline]
pub fn remap(value: f64, in_lo: f64, in_hi: f64, out_lo: f64, out_hi: f64) -> f64 {
    let span = in_hi - in_lo;
    if span == 0.0 {
        return out_lo;
    }
    out_lo + (value - in_lo) / span * (out_hi - out_lo)
}

// =============================================================================
// ARENA BOUNDS
// =============================================================================

/// Margin kept between any agent and the arena edge.
pub const WALL_MARGIN: f64 = 5.0;

/// The playable arena rectangle, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Arena width
    pub width: f64,
    /// Arena height
    pub height: f64,
}

impl Bounds {
    /// Create arena bounds.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Arena center point.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a position into `[5, width-5] x [5, height-5]`.
    #[inline]
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            pos.x.clamp(WALL_MARGIN, self.width - WALL_MARGIN),
            pos.y.clamp(WALL_MARGIN, self.height - WALL_MARGIN),
        )
    }

    /// Check if a position is inside the clamped play area.
    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= WALL_MARGIN
            && pos.x <= self.width - WALL_MARGIN
            && pos.y >= WALL_MARGIN
            && pos.y <= self.height - WALL_MARGIN
    }

    /// Check if a position is farther than `margin` outside the rectangle.
    #[inline]
    pub fn is_far_outside(&self, pos: Vec2, margin: f64) -> bool {
        pos.x < -margin || pos.x > self.width + margin || pos.y < -margin || pos.y > self.height + margin
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

// =============================================================================
// TESTS
// =============================================================================
