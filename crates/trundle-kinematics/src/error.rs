#![warn(missing_docs)]

//! Error types for the kinematics library.
//!
//! This module defines error types that can occur while constructing or
//! stepping the wheel and chassis state machines.

use core::fmt;

/// Errors that can occur in kinematic configuration or updates.
#[derive(Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// Error for an invalid arm angle range.
    /// This variant is returned when the configured maximum angle does not exceed the minimum.
    InvalidAngleRange(&'static str),
    /// Error for an invalid starting arm angle.
    /// This variant is returned when the starting angle lies outside the configured bounds.
    InvalidStartingAngle(&'static str),
    /// Error for an invalid arm blend strength.
    /// This variant is returned when the blend strength is outside `(0, 1]`.
    InvalidBlendStrength(&'static str),
    /// Error for an invalid adjustment window duration.
    InvalidAdjustDuration(&'static str),
    /// Error for an invalid flail speed threshold.
    InvalidFlailThreshold(&'static str),
    /// Error for an invalid acceleration coefficient.
    InvalidAcceleration(&'static str),
    /// Error for an invalid velocity ceiling.
    InvalidMotionLimit(&'static str),
    /// Error for an invalid friction coefficient.
    InvalidFriction(&'static str),
    /// Error for negative time delta.
    /// This variant is returned when a negative time delta is used for an update.
    NegativeTimeDelta(&'static str),
}

impl core::fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KinematicsError::InvalidAngleRange(msg) => write!(f, "Invalid angle range: {}", msg),
            KinematicsError::InvalidStartingAngle(msg) => {
                write!(f, "Invalid starting angle: {}", msg)
            }
            KinematicsError::InvalidBlendStrength(msg) => {
                write!(f, "Invalid blend strength: {}", msg)
            }
            KinematicsError::InvalidAdjustDuration(msg) => {
                write!(f, "Invalid adjust duration: {}", msg)
            }
            KinematicsError::InvalidFlailThreshold(msg) => {
                write!(f, "Invalid flail threshold: {}", msg)
            }
            KinematicsError::InvalidAcceleration(msg) => {
                write!(f, "Invalid acceleration: {}", msg)
            }
            KinematicsError::InvalidMotionLimit(msg) => write!(f, "Invalid motion limit: {}", msg),
            KinematicsError::InvalidFriction(msg) => write!(f, "Invalid friction: {}", msg),
            KinematicsError::NegativeTimeDelta(msg) => write!(f, "Negative time delta: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for KinematicsError {}
