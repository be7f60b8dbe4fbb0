//! Externally-owned spatial nodes addressed by opaque handles.
//!
//! The host creates the nodes (chassis, wheels, arm targets) and keeps
//! ownership of the store; the rig only reads the nodes it was wired with
//! and writes the fields it animates. Nodes are never destroyed here, so a
//! handle stays valid for the life of its scene.

use trundle_kinematics::Vec3;

use crate::error::RigError;

/// Opaque handle to a scene transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransformId(usize);

/// A positionable, rotatable node.
///
/// `yaw_deg` orients the node about the vertical axis; `spin_deg`
/// accumulates visual roll about the node's right axis (wheels only).
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Diagnostic name, fixed at spawn.
    pub name: String,
    /// World-frame position.
    pub position: Vec3,
    /// Heading about the vertical axis (degrees).
    pub yaw_deg: f64,
    /// Accumulated roll about the node's right axis (degrees).
    pub spin_deg: f64,
}

/// Flat store of transforms.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<Transform>,
}

impl Scene {
    /// An empty scene.
    pub fn new() -> Self {
        Scene::default()
    }

    /// Create a node at `position` and return its handle.
    pub fn spawn(&mut self, name: impl Into<String>, position: Vec3) -> TransformId {
        let id = TransformId(self.nodes.len());
        self.nodes.push(Transform {
            name: name.into(),
            position,
            yaw_deg: 0.0,
            spin_deg: 0.0,
        });
        id
    }

    /// Borrow a node.
    pub fn get(&self, id: TransformId) -> Result<&Transform, RigError> {
        self.nodes.get(id.0).ok_or(RigError::TransformNotFound(id))
    }

    /// Mutably borrow a node.
    pub fn get_mut(&mut self, id: TransformId) -> Result<&mut Transform, RigError> {
        self.nodes
            .get_mut(id.0)
            .ok_or(RigError::TransformNotFound(id))
    }

    /// Read a node's world position.
    pub fn position(&self, id: TransformId) -> Result<Vec3, RigError> {
        Ok(self.get(id)?.position)
    }

    /// Move a node.
    pub fn set_position(&mut self, id: TransformId, position: Vec3) -> Result<(), RigError> {
        self.get_mut(id)?.position = position;
        Ok(())
    }

    /// Add visual roll to a node.
    pub fn add_spin(&mut self, id: TransformId, degrees: f64) -> Result<(), RigError> {
        self.get_mut(id)?.spin_deg += degrees;
        Ok(())
    }

    /// Number of nodes in the scene.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
