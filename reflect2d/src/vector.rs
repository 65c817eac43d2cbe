//! Plain 2D vector helpers.
//!
//! These are thin wrappers around [`nalgebra`] operators, kept as free functions
//! so the geometry code reads the same way whichever representation it is fed.

use super::*;

/// A position in world space.
pub type Point = Point2<Float>;

/// A direction or displacement in world space. Never positional.
pub type Vector = Vector2<Float>;

#[inline]
#[must_use]
pub fn add(a: &Vector, b: &Vector) -> Vector {
    a + b
}

#[inline]
#[must_use]
pub fn subtract(a: &Vector, b: &Vector) -> Vector {
    a - b
}

#[inline]
#[must_use]
pub fn scale(v: &Vector, k: Float) -> Vector {
    v * k
}

#[inline]
#[must_use]
pub fn dot(a: &Vector, b: &Vector) -> Float {
    a.dot(b)
}

#[inline]
#[must_use]
pub fn length(v: &Vector) -> Float {
    v.norm()
}

/// Returns `v` scaled to unit length.
///
/// The zero vector has no direction, it is returned as is.
#[inline]
#[must_use]
pub fn normalize(v: &Vector) -> Vector {
    v.try_normalize(0.0).unwrap_or_else(Vector::zeros)
}

/// The angle between `v` and the `x` axis, in `(-π, π]`.
#[inline]
#[must_use]
pub fn angle_of(v: &Vector) -> Float {
    v.y.atan2(v.x)
}

/// The unit vector pointing at `theta` radians from the `x` axis.
#[inline]
#[must_use]
pub fn from_angle(theta: Float) -> Vector {
    let (sin, cos) = theta.sin_cos();
    Vector::new(cos, sin)
}

/// `v` rotated by a quarter turn counter-clockwise.
#[inline]
#[must_use]
pub fn perp(v: &Vector) -> Vector {
    Vector::new(-v.y, v.x)
}
