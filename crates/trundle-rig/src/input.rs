//! Input resolution and the drive controller.
//!
//! The resolution service is injected at construction rather than looked up
//! globally, and events arrive over whatever channel the frame driver pumps;
//! dropping the receiver is the unsubscription. The controller latches its
//! active flag from events and polls the live axis pair while active.

use std::sync::Arc;

use trundle_kinematics::{ChassisMotion, ChassisPose, MotionConfig, Vec2};

use crate::error::RigError;
use crate::scene::{Scene, TransformId};

/// Handle to a resolved input action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionHandle(u32);

impl ActionHandle {
    /// Construct a handle from a registry-assigned index.
    pub const fn new(raw: u32) -> Self {
        ActionHandle(raw)
    }
}

/// Resolves named actions and reads their live 2-D value.
///
/// Implementations are owned by the host; the controller only holds a
/// shared reference handed to it at construction.
pub trait InputActions {
    /// Look up an action by its configured identifier.
    fn resolve(&self, id: &str) -> Option<ActionHandle>;
    /// Read the action's current input vector.
    fn axis_pair(&self, action: ActionHandle) -> Vec2;
}

/// Lifecycle phase of an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPhase {
    /// The binding started engaging.
    Started,
    /// The binding is actively held.
    Performed,
    /// The binding was released.
    Canceled,
}

/// One event from the host's input stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    /// The action the event belongs to.
    pub action: ActionHandle,
    /// Lifecycle phase.
    pub phase: InputPhase,
    /// Axis pair carried by the event.
    pub value: Vec2,
}

/// Converts directional input into chassis motion.
///
/// Holds the two-channel velocity integrator and applies its per-frame step
/// to the chassis node: yaw first, then travel along the new heading.
pub struct DriveController {
    actions: Arc<dyn InputActions + Send + Sync>,
    action: ActionHandle,
    config: MotionConfig,
    motion: ChassisMotion,
    input_active: bool,
}

impl DriveController {
    /// Resolve the configured action and validate the motion tuning.
    ///
    /// # Errors
    ///
    /// Returns `RigError::ActionNotFound` if the identifier does not resolve
    /// — a startup-fatal misconfiguration for this controller, not something
    /// to ignore. Propagates `MotionConfig` validation failures.
    pub fn new(
        actions: Arc<dyn InputActions + Send + Sync>,
        action_id: &str,
        config: MotionConfig,
    ) -> Result<Self, RigError> {
        config.validate()?;
        let action = actions
            .resolve(action_id)
            .ok_or_else(|| RigError::ActionNotFound(action_id.to_owned()))?;
        Ok(DriveController {
            actions,
            action,
            config,
            motion: ChassisMotion::new(),
            input_active: false,
        })
    }

    /// Latch the active flag from a matching event.
    ///
    /// Events for other actions are ignored; a matching event sets the flag
    /// iff its phase is `Performed`.
    pub fn handle_event(&mut self, event: &InputEvent) {
        if event.action == self.action {
            self.input_active = event.phase == InputPhase::Performed;
        }
    }

    /// Integrate one frame of motion and apply it to the chassis node.
    ///
    /// # Errors
    ///
    /// Propagates integrator errors (negative `dt`) and unknown chassis
    /// handles.
    pub fn update(
        &mut self,
        scene: &mut Scene,
        chassis: TransformId,
        dt: f64,
    ) -> Result<(), RigError> {
        let input = self
            .input_active
            .then(|| self.actions.axis_pair(self.action));
        let step = self.motion.update(input, &self.config, dt)?;

        let node = scene.get_mut(chassis)?;
        let mut pose = ChassisPose::new(node.position, node.yaw_deg);
        pose.advance(step.yaw_deg, step.forward);
        node.position = pose.position;
        node.yaw_deg = pose.yaw_deg;
        Ok(())
    }

    /// Whether the controller currently reads input.
    pub fn is_active(&self) -> bool {
        self.input_active
    }

    /// The velocity integrator, for telemetry.
    pub fn motion(&self) -> &ChassisMotion {
        &self.motion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use trundle_kinematics::Vec3;

    struct FakeActions {
        axes: Mutex<Vec2>,
    }

    impl FakeActions {
        fn shared(axes: Vec2) -> Arc<Self> {
            Arc::new(FakeActions {
                axes: Mutex::new(axes),
            })
        }
    }

    impl InputActions for FakeActions {
        fn resolve(&self, id: &str) -> Option<ActionHandle> {
            (id == "drive").then(|| ActionHandle::new(0))
        }

        fn axis_pair(&self, _action: ActionHandle) -> Vec2 {
            *self.axes.lock().unwrap()
        }
    }

    fn frictionless() -> MotionConfig {
        MotionConfig {
            acceleration: 10.0,
            max_velocity: 5.0,
            friction: 0.0,
            turn_acceleration: 100.0,
            max_turn_velocity: 50.0,
            turn_friction: 0.0,
        }
    }

    fn event(phase: InputPhase) -> InputEvent {
        InputEvent {
            action: ActionHandle::new(0),
            phase,
            value: Vec2::new(0.0, 1.0),
        }
    }

    #[test]
    fn test_unresolvable_action_is_fatal() {
        let actions = FakeActions::shared(Vec2::default());
        let result = DriveController::new(actions, "missing", frictionless());
        assert!(matches!(result, Err(RigError::ActionNotFound(id)) if id == "missing"));
    }

    #[test]
    fn test_invalid_tuning_is_fatal() {
        let actions = FakeActions::shared(Vec2::default());
        let mut config = frictionless();
        config.max_velocity = 0.0;
        assert!(matches!(
            DriveController::new(actions, "drive", config),
            Err(RigError::Kinematics(_))
        ));
    }

    #[test]
    fn test_active_flag_is_edge_triggered() {
        let actions = FakeActions::shared(Vec2::default());
        let mut controller = DriveController::new(actions, "drive", frictionless()).unwrap();
        assert!(!controller.is_active());

        // Started alone does not engage; Performed does; Canceled clears.
        controller.handle_event(&event(InputPhase::Started));
        assert!(!controller.is_active());
        controller.handle_event(&event(InputPhase::Performed));
        assert!(controller.is_active());
        controller.handle_event(&event(InputPhase::Canceled));
        assert!(!controller.is_active());

        // A foreign action never touches the flag.
        controller.handle_event(&event(InputPhase::Performed));
        controller.handle_event(&InputEvent {
            action: ActionHandle::new(7),
            phase: InputPhase::Canceled,
            value: Vec2::default(),
        });
        assert!(controller.is_active());
    }

    #[test]
    fn test_update_moves_the_chassis_while_active() {
        let actions = FakeActions::shared(Vec2::new(0.0, 1.0));
        let mut controller =
            DriveController::new(actions, "drive", frictionless()).unwrap();
        let mut scene = Scene::new();
        let chassis = scene.spawn("chassis", Vec3::ZERO);

        // Inactive: friction-free but no input, nothing moves.
        controller.update(&mut scene, chassis, 0.1).unwrap();
        assert_eq!(scene.position(chassis).unwrap(), Vec3::ZERO);

        controller.handle_event(&event(InputPhase::Performed));
        controller.update(&mut scene, chassis, 0.1).unwrap();
        // 10 * 0.1 = 1 unit of forward velocity, applied along +Z.
        let position = scene.position(chassis).unwrap();
        assert!((position.z - 1.0).abs() < 1e-9);
        assert!((controller.motion().velocity() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_turn_axis_yaws_the_chassis() {
        let actions = FakeActions::shared(Vec2::new(0.5, 0.0));
        let mut controller =
            DriveController::new(actions, "drive", frictionless()).unwrap();
        let mut scene = Scene::new();
        let chassis = scene.spawn("chassis", Vec3::ZERO);

        controller.handle_event(&InputEvent {
            action: ActionHandle::new(0),
            phase: InputPhase::Performed,
            value: Vec2::new(0.5, 0.0),
        });
        controller.update(&mut scene, chassis, 0.1).unwrap();
        // 100 * 0.5 * 0.1 = 5 degrees of yaw this frame.
        assert!((scene.get(chassis).unwrap().yaw_deg - 5.0).abs() < 1e-9);
    }
}
