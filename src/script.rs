//! Stand-in input source: a scripted drive pattern replaces a human at the
//! stick, so the runtime exercises press/hold/release transitions without a
//! device attached.

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info};

use trundle_kinematics::Vec2;
use trundle_rig::{ActionHandle, InputActions, InputEvent, InputPhase};

use crate::bus::Topic;

/// Action registry plus live axis state, shared between the script task and
/// the frame loop. This is the resolution service the drive controller is
/// constructed with.
pub struct ScriptedInput {
    actions: Vec<String>,
    axes: RwLock<Vec2>,
}

impl ScriptedInput {
    pub fn new(action_ids: &[&str]) -> Arc<Self> {
        Arc::new(ScriptedInput {
            actions: action_ids.iter().map(|s| s.to_string()).collect(),
            axes: RwLock::new(Vec2::default()),
        })
    }

    fn set_axes(&self, value: Vec2) {
        *self.axes.write() = value;
    }
}

impl InputActions for ScriptedInput {
    fn resolve(&self, id: &str) -> Option<ActionHandle> {
        self.actions
            .iter()
            .position(|a| a == id)
            .map(|i| ActionHandle::new(i as u32))
    }

    fn axis_pair(&self, _action: ActionHandle) -> Vec2 {
        *self.axes.read()
    }
}

struct Segment {
    label: &'static str,
    axes: Vec2,
    hold: Duration,
    rest: Duration,
}

const SCRIPT: &[Segment] = &[
    Segment {
        label: "push forward",
        axes: Vec2::new(0.0, 1.0),
        hold: Duration::from_millis(3000),
        rest: Duration::from_millis(1500),
    },
    Segment {
        label: "reverse with a left turn",
        axes: Vec2::new(-0.6, -0.8),
        hold: Duration::from_millis(2500),
        rest: Duration::from_millis(1500),
    },
    Segment {
        label: "hard forward-right",
        axes: Vec2::new(0.8, 1.0),
        hold: Duration::from_millis(2000),
        rest: Duration::from_millis(2500),
    },
];

/// Loop the drive script forever, publishing phase events around each hold.
pub async fn run(input: Arc<ScriptedInput>, events: Topic<InputEvent>, action_id: String) {
    let Some(action) = input.resolve(&action_id) else {
        error!(action = %action_id, "Script cannot resolve its own action; input stays idle");
        return;
    };

    info!("Input script started");
    loop {
        for segment in SCRIPT {
            info!(
                label = segment.label,
                x = segment.axes.x,
                y = segment.axes.y,
                "Script segment"
            );
            input.set_axes(segment.axes);
            events.publish(InputEvent {
                action,
                phase: InputPhase::Started,
                value: segment.axes,
            });
            events.publish(InputEvent {
                action,
                phase: InputPhase::Performed,
                value: segment.axes,
            });
            sleep(segment.hold).await;

            input.set_axes(Vec2::default());
            events.publish(InputEvent {
                action,
                phase: InputPhase::Canceled,
                value: Vec2::default(),
            });
            sleep(segment.rest).await;
        }
    }
}
