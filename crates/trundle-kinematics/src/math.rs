#![warn(missing_docs)]

//! Vector and angle primitives shared by the wheel and chassis machines.

use core::f64::consts::PI;
use core::fmt;
use core::ops::{Add, AddAssign, Mul, Neg, Sub};
use libm::{acos, cos, sin, sqrt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Degrees-to-radians conversion factor.
pub const DEG_TO_RAD: f64 = PI / 180.0;

/// A 3-D vector (meters), Y up.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component (up).
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    /// World up.
    pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

    /// Construct a vector from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3 { x, y, z }
    }

    /// Dot product.
    pub fn dot(self, rhs: Vec3) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Cross product.
    pub fn cross(self, rhs: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// Euclidean length.
    pub fn magnitude(self) -> f64 {
        sqrt(self.dot(self))
    }

    /// Linear interpolation from `self` toward `target` by `t` (not clamped).
    pub fn lerp(self, target: Vec3, t: f64) -> Vec3 {
        self + (target - self) * t
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// A 2-D input vector: `x` is the turn axis, `y` the forward/backward axis.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    /// Turn axis, positive turning right.
    pub x: f64,
    /// Thrust axis, positive moving forward.
    pub y: f64,
}

impl Vec2 {
    /// Construct an input vector from components.
    pub const fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Angle in degrees between two vectors.
///
/// The cosine is clamped before `acos`, so near-parallel inputs cannot
/// produce NaN from rounding. A zero-length input has no direction and
/// yields `0.0`; callers that care must branch on the magnitude first.
pub fn angle_between_deg(a: Vec3, b: Vec3) -> f64 {
    let denom = a.magnitude() * b.magnitude();
    if denom == 0.0 {
        return 0.0;
    }
    acos((a.dot(b) / denom).clamp(-1.0, 1.0)) / DEG_TO_RAD
}

/// Rotate `v` about the unit-length `axis` by `angle_deg` (Rodrigues' formula).
pub fn rotate_about_axis(v: Vec3, axis: Vec3, angle_deg: f64) -> Vec3 {
    let theta = angle_deg * DEG_TO_RAD;
    let (s, c) = (sin(theta), cos(theta));
    v * c + axis.cross(v) * s + axis * (axis.dot(v) * (1.0 - c))
}

/// Smoothstep ease-in-out over `[0, 1]`; input is clamped.
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-9;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).magnitude() < 1e-9
    }

    #[test]
    fn test_dot_cross_magnitude() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(a.dot(b), 0.0);
        assert!(approx(a.cross(b), Vec3::new(0.0, 0.0, 1.0)));
        assert!((Vec3::new(3.0, 0.0, 4.0).magnitude() - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 4.0, 6.0);
        assert!(approx(a.lerp(b, 0.0), a));
        assert!(approx(a.lerp(b, 1.0), b));
        assert!(approx(a.lerp(b, 0.5), Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_angle_between() {
        let fwd = Vec3::new(0.0, 0.0, 1.0);
        assert!((angle_between_deg(fwd, fwd) - 0.0).abs() < EPSILON);
        assert!((angle_between_deg(fwd, Vec3::new(1.0, 0.0, 0.0)) - 90.0).abs() < EPSILON);
        assert!((angle_between_deg(fwd, -fwd) - 180.0).abs() < EPSILON);
    }

    #[test]
    fn test_angle_between_zero_vector_is_guarded() {
        // No direction, no NaN.
        let angle = angle_between_deg(Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO);
        assert!(angle.is_finite());
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_rotate_about_vertical_axis() {
        // +Z rotated 90 degrees about +Y lands on +X.
        let rotated = rotate_about_axis(Vec3::new(0.0, 0.0, 1.0), Vec3::UP, 90.0);
        assert!(approx(rotated, Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_rotate_about_right_axis() {
        // +Z rotated 90 degrees about +X lands on +Y.
        let rotated = rotate_about_axis(Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0), 90.0);
        assert!(approx(rotated, Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_rotate_preserves_length() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let rotated = rotate_about_axis(v, Vec3::UP, 37.0);
        assert!((rotated.magnitude() - v.magnitude()).abs() < EPSILON);
    }

    #[test]
    fn test_ease_in_out_shape() {
        assert!((ease_in_out(0.0) - 0.0).abs() < EPSILON);
        assert!((ease_in_out(1.0) - 1.0).abs() < EPSILON);
        assert!((ease_in_out(0.5) - 0.5).abs() < EPSILON);
        // Clamped outside the unit interval.
        assert_eq!(ease_in_out(-1.0), 0.0);
        assert_eq!(ease_in_out(2.0), 1.0);
        // Slow start: the first quarter covers less than a quarter of the range.
        assert!(ease_in_out(0.25) < 0.25);
        assert!(ease_in_out(0.75) > 0.75);
    }
}
