//! Error types for the rig layer.

use thiserror::Error;
use trundle_kinematics::KinematicsError;

use crate::scene::TransformId;

/// Errors surfaced by scene wiring, the ensemble, or the drive controller.
#[derive(Debug, Error)]
pub enum RigError {
    /// A transform handle does not name a live scene node.
    #[error("transform {0:?} is not part of the scene")]
    TransformNotFound(TransformId),
    /// The configured input action could not be resolved at startup.
    #[error("input action {0:?} could not be resolved")]
    ActionNotFound(String),
    /// Ensemble tuning failed validation.
    #[error("invalid ensemble config: {0}")]
    InvalidEnsembleConfig(&'static str),
    /// A wheel or motion state machine rejected its configuration or input.
    #[error(transparent)]
    Kinematics(#[from] KinematicsError),
}
