//! The wheel ensemble: ordered per-frame drive of every wheel, with optional
//! arm-angle synchronization toward the ensemble mean.

use tracing::debug;
use trundle_kinematics::{ChassisPose, Vec3, WheelConfig, WheelKinematics};

use crate::error::RigError;
use crate::scene::{Scene, TransformId};

/// Ensemble-wide tuning.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnsembleConfig {
    /// Degrees of wheel roll per unit of chassis displacement.
    pub angle_speed: f64,
    /// Whether arm angles are pulled toward the ensemble mean each frame.
    pub sync_enabled: bool,
    /// Per-frame convergence factor toward the mean, in `[0, 1]`.
    pub sync_strength: f64,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        EnsembleConfig {
            angle_speed: 10.0,
            sync_enabled: false,
            sync_strength: 0.25,
        }
    }
}

impl EnsembleConfig {
    fn validate(&self) -> Result<(), RigError> {
        if self.angle_speed <= 0.0 {
            return Err(RigError::InvalidEnsembleConfig(
                "angle_speed must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.sync_strength) {
            return Err(RigError::InvalidEnsembleConfig(
                "sync_strength must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

struct WheelSlot {
    wheel: TransformId,
    arm: TransformId,
    /// Chassis-local mount offset, captured at wiring time.
    mount: Vec3,
    unit: WheelKinematics,
}

/// Read-only debug snapshot of one wheel, for external line/sphere drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelProbe {
    /// Wheel world position.
    pub wheel_position: Vec3,
    /// Arm world position.
    pub arm_position: Vec3,
    /// Current rolling arm angle (degrees).
    pub arm_angle: f64,
    /// Whether the wheel is flailing.
    pub flailing: bool,
    /// Signed distance covered by the last update.
    pub last_distance: f64,
}

/// Ordered collection of wheel units driven once per frame.
///
/// Wiring order is update order; it never changes afterwards, so two runs
/// over the same scene produce identical frames.
pub struct WheelEnsemble {
    config: EnsembleConfig,
    chassis: TransformId,
    slots: Vec<WheelSlot>,
}

impl WheelEnsemble {
    /// Build an empty ensemble bound to a chassis node.
    ///
    /// # Errors
    ///
    /// Returns `RigError::InvalidEnsembleConfig` for tuning the update pass
    /// cannot run with.
    pub fn new(config: EnsembleConfig, chassis: TransformId) -> Result<Self, RigError> {
        config.validate()?;
        Ok(WheelEnsemble {
            config,
            chassis,
            slots: Vec::new(),
        })
    }

    /// Wire one wheel/arm pair into the ensemble.
    ///
    /// Captures the wheel's chassis-local mount offset and the arm's hand
    /// offset from the current scene state. A failure here leaves the
    /// ensemble untouched, so a misconfigured wheel can sit out while the
    /// rest of the vehicle runs.
    ///
    /// # Errors
    ///
    /// Returns `RigError::TransformNotFound` for dead handles and propagates
    /// wheel tuning validation failures.
    pub fn add_wheel(
        &mut self,
        scene: &Scene,
        wheel: TransformId,
        arm: TransformId,
        tuning: WheelConfig,
    ) -> Result<(), RigError> {
        let chassis = self.chassis_pose(scene)?;
        let wheel_position = scene.position(wheel)?;
        let arm_position = scene.position(arm)?;
        let mount = chassis.rotate_to_local(wheel_position - chassis.position);
        let unit = WheelKinematics::new(tuning, wheel_position, arm_position)?;
        self.slots.push(WheelSlot {
            wheel,
            arm,
            mount,
            unit,
        });
        Ok(())
    }

    /// Number of wired wheels.
    pub fn wheel_count(&self) -> usize {
        self.slots.len()
    }

    /// Current arm angles, in wiring order.
    pub fn arm_angles(&self) -> impl Iterator<Item = f64> + '_ {
        self.slots.iter().map(|slot| slot.unit.arm_angle())
    }

    fn chassis_pose(&self, scene: &Scene) -> Result<ChassisPose, RigError> {
        let node = scene.get(self.chassis)?;
        Ok(ChassisPose::new(node.position, node.yaw_deg))
    }

    /// Drive every wheel one frame: synchronize, reposition, roll, place arms.
    ///
    /// # Errors
    ///
    /// Propagates dead handles and kinematics errors (negative `dt`).
    pub fn update(&mut self, scene: &mut Scene, dt: f64) -> Result<(), RigError> {
        let chassis = self.chassis_pose(scene)?;

        // Synchronization runs before the roll update so a nudge across a
        // bound wraps within the same frame.
        if self.config.sync_enabled && !self.slots.is_empty() {
            let mean = self.slots.iter().map(|s| s.unit.arm_angle()).sum::<f64>()
                / self.slots.len() as f64;
            for slot in &mut self.slots {
                let angle = slot.unit.arm_angle();
                slot.unit
                    .set_arm_angle(angle + (mean - angle) * self.config.sync_strength);
            }
        }

        for slot in &mut self.slots {
            let wheel_position = chassis.position + chassis.rotate_to_world(slot.mount);
            scene.set_position(slot.wheel, wheel_position)?;

            let spin = slot
                .unit
                .update(wheel_position, &chassis, self.config.angle_speed, dt)?;
            scene.add_spin(slot.wheel, spin.degrees)?;
            if spin.wrapped {
                debug!(
                    wheel = %scene.get(slot.wheel)?.name,
                    angle = slot.unit.arm_angle(),
                    "arm angle wrapped, re-anchoring"
                );
            }

            let arm_position = scene.position(slot.arm)?;
            let placed = slot
                .unit
                .update_arm(arm_position, wheel_position, &chassis, dt)?;
            scene.set_position(slot.arm, placed)?;
        }
        Ok(())
    }

    /// Read-only world-space snapshot for external debug rendering.
    ///
    /// # Errors
    ///
    /// Propagates dead handles.
    pub fn probe(&self, scene: &Scene) -> Result<Vec<WheelProbe>, RigError> {
        self.slots
            .iter()
            .map(|slot| {
                Ok(WheelProbe {
                    wheel_position: scene.position(slot.wheel)?,
                    arm_position: scene.position(slot.arm)?,
                    arm_angle: slot.unit.arm_angle(),
                    flailing: slot.unit.is_flailing(),
                    last_distance: slot.unit.last_distance(),
                })
            })
            .collect()
    }
}
