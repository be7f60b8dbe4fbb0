#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library for procedural roll-to-arm kinematics of hand-driven wheeled vehicles."]
#![doc = ""]
#![doc = "This crate provides the per-wheel rolling state machine (angle integration,"]
#![doc = "bound wrap-around, arm re-anchoring, flail detection) and the chassis"]
#![doc = "locomotion integrator (velocity accumulation, clamping, friction decay)."]

#[cfg(feature = "std")]
extern crate std;

pub mod chassis;
pub mod error;
pub mod math;
pub mod wheel;

pub use chassis::{ChassisMotion, ChassisPose, MotionConfig, StepDelta};
pub use error::KinematicsError;
pub use math::{Vec2, Vec3};
pub use wheel::{AdjustCurve, ArmAdjustment, WheelConfig, WheelKinematics, WheelSpin};
