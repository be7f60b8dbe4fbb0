#![warn(missing_docs)]

//! Chassis pose and the locomotion integrator.
//!
//! The chassis is the vehicle root: a world position plus a yaw heading. The
//! integrator accumulates directional input into two signed velocity channels
//! (forward and yaw), clamps them, and bleeds them off with friction so the
//! vehicle coasts to an exact stop.

use core::fmt;
use libm::{cos, sin};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::KinematicsError;
use crate::math::{DEG_TO_RAD, Vec2, Vec3};

/// World-frame chassis pose: position plus yaw about the vertical axis.
///
/// Yaw is in degrees. At zero yaw the chassis faces `+Z` with `+X` to its
/// right; positive yaw turns the nose toward `+X`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChassisPose {
    /// World-frame position (m).
    pub position: Vec3,
    /// Heading (degrees) about the vertical axis.
    pub yaw_deg: f64,
}

impl ChassisPose {
    /// Construct a pose from a position and heading.
    pub const fn new(position: Vec3, yaw_deg: f64) -> Self {
        ChassisPose { position, yaw_deg }
    }

    /// Unit vector the chassis is facing.
    pub fn forward(&self) -> Vec3 {
        let r = self.yaw_deg * DEG_TO_RAD;
        Vec3::new(sin(r), 0.0, cos(r))
    }

    /// Unit vector out of the chassis's right side.
    pub fn right(&self) -> Vec3 {
        let r = self.yaw_deg * DEG_TO_RAD;
        Vec3::new(cos(r), 0.0, -sin(r))
    }

    /// Rotate a chassis-local vector into world coordinates.
    pub fn rotate_to_world(&self, v: Vec3) -> Vec3 {
        let r = self.yaw_deg * DEG_TO_RAD;
        let (s, c) = (sin(r), cos(r));
        Vec3::new(v.x * c + v.z * s, v.y, v.z * c - v.x * s)
    }

    /// Rotate a world vector into chassis-local coordinates.
    pub fn rotate_to_local(&self, v: Vec3) -> Vec3 {
        let r = self.yaw_deg * DEG_TO_RAD;
        let (s, c) = (sin(r), cos(r));
        Vec3::new(v.x * c - v.z * s, v.y, v.z * c + v.x * s)
    }

    /// Apply one frame of motion: yaw first, then translate along the new
    /// forward direction.
    pub fn advance(&mut self, yaw_delta_deg: f64, forward_distance: f64) {
        self.yaw_deg += yaw_delta_deg;
        self.position += self.forward() * forward_distance;
    }
}

impl fmt::Display for ChassisPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(pos: {}, yaw: {:.1}°)", self.position, self.yaw_deg)
    }
}

/// Tunables for the locomotion integrator.
///
/// The `acceleration`/`friction` pair shapes the forward channel (distance
/// units per frame, fed per second), the `turn_*` pair the yaw channel
/// (degrees per frame, fed per second).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionConfig {
    /// Forward-channel gain applied to the thrust axis (per second).
    pub acceleration: f64,
    /// Forward velocity ceiling (absolute value).
    pub max_velocity: f64,
    /// Forward-channel decay toward zero (per second).
    pub friction: f64,
    /// Yaw-channel gain applied to the turn axis (per second).
    pub turn_acceleration: f64,
    /// Yaw velocity ceiling (absolute value, degrees).
    pub max_turn_velocity: f64,
    /// Yaw-channel decay toward zero (per second).
    pub turn_friction: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        MotionConfig {
            acceleration: 0.1,
            max_velocity: 0.05,
            friction: 0.04,
            turn_acceleration: 2.0,
            max_turn_velocity: 1.0,
            turn_friction: 1.2,
        }
    }
}

impl MotionConfig {
    /// Check the tuning for values the integrator cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::InvalidAcceleration)` if either gain is not positive.
    /// Returns `Err(KinematicsError::InvalidMotionLimit)` if either ceiling is not positive.
    /// Returns `Err(KinematicsError::InvalidFriction)` if either friction is negative.
    pub fn validate(&self) -> Result<(), KinematicsError> {
        if self.acceleration <= 0.0 || self.turn_acceleration <= 0.0 {
            return Err(KinematicsError::InvalidAcceleration("must be positive"));
        }
        if self.max_velocity <= 0.0 || self.max_turn_velocity <= 0.0 {
            return Err(KinematicsError::InvalidMotionLimit("must be positive"));
        }
        if self.friction < 0.0 || self.turn_friction < 0.0 {
            return Err(KinematicsError::InvalidFriction("must be non-negative"));
        }
        Ok(())
    }
}

/// This-frame motion deltas produced by [`ChassisMotion::update`].
///
/// Both values are per-frame deltas, already integrated over the frame's
/// time step: apply them directly, do not scale by `dt` again.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepDelta {
    /// Yaw to apply this frame (degrees).
    pub yaw_deg: f64,
    /// Forward distance to travel this frame.
    pub forward: f64,
}

impl StepDelta {
    /// A step that moves nothing.
    pub const ZERO: StepDelta = StepDelta {
        yaw_deg: 0.0,
        forward: 0.0,
    };
}

/// Two-channel velocity integrator for the chassis.
///
/// Each channel follows the same per-frame pattern: accumulate input scaled
/// by its gain (only while input is active), clamp to its ceiling, then decay
/// toward zero by friction. A decay step that would cross zero snaps to
/// exactly zero, so a released vehicle stops in finite time instead of
/// oscillating around rest.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChassisMotion {
    velocity: f64,
    angular_velocity: f64,
}

impl ChassisMotion {
    /// Construct a motion state at rest.
    pub const fn new() -> Self {
        ChassisMotion {
            velocity: 0.0,
            angular_velocity: 0.0,
        }
    }

    /// Current forward velocity (per-frame distance).
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current yaw velocity (per-frame degrees).
    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Integrate one frame.
    ///
    /// `input` carries the live axis pair while input is active and is
    /// `None` otherwise; friction applies either way. Axis values outside
    /// `[-1, 1]` are not rejected — the velocity clamp bounds the outcome.
    ///
    /// A paused frame (`dt == 0`) is valid and changes nothing: both
    /// channels keep their values and the returned step moves nothing.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::NegativeTimeDelta)` if `dt` is negative.
    pub fn update(
        &mut self,
        input: Option<Vec2>,
        config: &MotionConfig,
        dt: f64,
    ) -> Result<StepDelta, KinematicsError> {
        if dt < 0.0 {
            return Err(KinematicsError::NegativeTimeDelta("must be non-negative"));
        }
        if dt == 0.0 {
            return Ok(StepDelta::ZERO);
        }

        if let Some(axes) = input {
            self.velocity = (self.velocity + axes.y * config.acceleration * dt)
                .clamp(-config.max_velocity, config.max_velocity);
            self.angular_velocity = (self.angular_velocity + axes.x * config.turn_acceleration * dt)
                .clamp(-config.max_turn_velocity, config.max_turn_velocity);
        }

        self.velocity = decay_toward_zero(self.velocity, config.friction * dt);
        self.angular_velocity = decay_toward_zero(self.angular_velocity, config.turn_friction * dt);

        Ok(StepDelta {
            yaw_deg: self.angular_velocity,
            forward: self.velocity,
        })
    }
}

impl fmt::Display for ChassisMotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(v: {:.3}/frame, ω: {:.2}°/frame)",
            self.velocity, self.angular_velocity
        )
    }
}

/// One friction step. A step that would carry the value past zero snaps to
/// exactly zero.
fn decay_toward_zero(value: f64, amount: f64) -> f64 {
    if value > amount {
        value - amount
    } else if value < -amount {
        value + amount
    } else {
        0.0
    }
}
