use parking_lot::RwLock;
use std::sync::Arc;

use trundle_kinematics::ChassisPose;
use trundle_rig::WheelProbe;

/// Shared telemetry written by the frame loop and read by loggers.
#[derive(Clone, Default)]
pub struct State {
    pub chassis: ChassisPose,
    pub velocity: f64,
    pub angular_velocity: f64,
    pub wheels: Vec<WheelProbe>,
    pub faults: Vec<String>,
}

pub type Blackboard = Arc<RwLock<State>>;

pub fn snapshot(bb: &Blackboard) -> State {
    (*bb.read()).clone()
}

pub fn raise_fault(bb: &Blackboard, msg: &str) {
    let mut g = bb.write();
    if !g.faults.iter().any(|s| s == msg) {
        g.faults.push(msg.to_string());
    }
}
