//! Runtime wiring around the `trundle-kinematics` core.
//!
//! This crate owns everything that touches externally-provided state: the
//! transform scene the host hands us, the wheel ensemble that drives wheel
//! and arm nodes once per frame, and the drive controller that turns
//! resolved input into chassis motion. All tunables arrive as static config
//! structs; misconfiguration surfaces as a typed [`RigError`] at
//! construction time, never mid-frame.

pub mod ensemble;
pub mod error;
pub mod input;
pub mod scene;

pub use ensemble::{EnsembleConfig, WheelEnsemble, WheelProbe};
pub use error::RigError;
pub use input::{ActionHandle, DriveController, InputActions, InputEvent, InputPhase};
pub use scene::{Scene, Transform, TransformId};
