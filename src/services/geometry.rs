//! Screen-space geometry helpers.
//!
//! Pure functions used by the gesture resolver (projecting a drag onto a zone's
//! local vertical axis) and by calibration (turning a drawn vector into a zone
//! angle and length). Angles are in degrees, clockwise-positive, with 0° meaning
//! the zone's drag axis points straight down the screen.

use serde::{Deserialize, Serialize};

/// A point in screen space (pixels, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal screen coordinate
    pub x: f64,
    /// Vertical screen coordinate
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the vector `(dx, dy)` from `origin` to this point.
    #[must_use]
    pub fn delta_from(self, origin: Self) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// Projects the screen vector `(dx, dy)` onto the local vertical axis of a zone
/// rotated by `angle_degrees`.
///
/// The vector is rotated by `-angle_degrees` and its y-component returned:
/// `y' = dy·cos(a) + dx·sin(a)` with `a = -angle·π/180`.
#[must_use]
pub fn rotate_local_vertical(dx: f64, dy: f64, angle_degrees: f64) -> f64 {
    let a = (-angle_degrees).to_radians();
    dy.mul_add(a.cos(), dx * a.sin())
}

/// Converts a drawn vector into a zone angle in degrees.
///
/// Computes `-atan(dx/dy)`; upward vectors (`dy < 0`) get 180° added to escape
/// the ±90° range of the arctangent. A purely horizontal vector (`dy == 0`)
/// resolves to -90° when pointing right and 90° when pointing left, and the
/// zero vector resolves to 0°.
#[must_use]
pub fn vector_to_angle_degrees(dx: f64, dy: f64) -> f64 {
    if dy == 0.0 {
        return if dx > 0.0 {
            -90.0
        } else if dx < 0.0 {
            90.0
        } else {
            0.0
        };
    }

    let angle = -(dx / dy).atan().to_degrees();
    if dy < 0.0 {
        angle + 180.0
    } else {
        angle
    }
}

/// Euclidean length of `(dx, dy)`.
#[must_use]
pub fn vector_length(dx: f64, dy: f64) -> f64 {
    dx.hypot(dy)
}
