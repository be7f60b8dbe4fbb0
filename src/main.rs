mod blackboard; // brings `blackboard.rs` in as `crate::blackboard`
mod bus; // brings `bus.rs` in as `crate::bus`
mod config; // brings `config.rs` in as `crate::config`
mod script; // brings `script.rs` in as `crate::script`

use std::sync::Arc;
use std::time::Duration;

use spin_sleep::SpinSleeper;
use tracing::{error, info};
use tracing_subscriber::{self, EnvFilter};

use trundle_kinematics::{ChassisPose, Vec3};
use trundle_rig::{DriveController, InputActions, InputEvent, Scene, WheelEnsemble};

use blackboard::{Blackboard, raise_fault, snapshot};
use bus::Topic;

const FRAME_HZ: u64 = 60;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    info!("Trundle runtime starting");

    let app = config::load()?;

    // Scene wiring: the host owns every node; the rig only animates them.
    let mut scene = Scene::new();
    let chassis = scene.spawn("chassis", Vec3::ZERO);

    let mut ensemble = WheelEnsemble::new(app.ensemble, chassis)?;
    for section in &app.wheels {
        let wheel = scene.spawn(section.name.as_str(), section.mount);
        let arm = scene.spawn(
            format!("{}-arm", section.name),
            section.mount + section.arm_offset,
        );
        if let Err(e) = ensemble.add_wheel(&scene, wheel, arm, section.tuning.clone()) {
            // A misconfigured wheel sits out; the rest of the vehicle runs.
            error!(wheel = %section.name, "Skipping wheel: {e}");
        }
    }
    info!(wheels = ensemble.wheel_count(), "Wheel ensemble ready");

    let input = script::ScriptedInput::new(&[app.drive.action.as_str()]);
    let events: Topic<InputEvent> = Topic::new(16);
    let mut event_rx = events.subscribe();

    let bb: Blackboard = Arc::default();

    let actions: Arc<dyn InputActions + Send + Sync> = input.clone();
    let mut controller =
        match DriveController::new(actions, &app.drive.action, app.drive.motion) {
            Ok(controller) => Some(controller),
            Err(e) => {
                error!("Drive controller disabled: {e}");
                raise_fault(&bb, "drive controller disabled");
                None
            }
        };

    info!("Spawning input script task...");
    let tokio_rt = tokio::runtime::Runtime::new()?;
    tokio_rt.spawn(script::run(input, events.clone(), app.drive.action.clone()));

    // Fixed-step frame loop: drain input events, integrate locomotion, then
    // drive the wheels — the same order every frame.
    let sleeper = SpinSleeper::new(10_000);
    let dt = 1.0 / FRAME_HZ as f64;
    let mut frame: u64 = 0;

    info!("Frame loop started at {} Hz", FRAME_HZ);
    loop {
        bus::drain(&mut event_rx, |event| {
            if let Some(controller) = controller.as_mut() {
                controller.handle_event(event);
            }
        });

        if let Some(mut active) = controller.take() {
            match active.update(&mut scene, chassis, dt) {
                Ok(()) => controller = Some(active),
                Err(e) => {
                    error!("Drive controller failed, disabling: {e}");
                    raise_fault(&bb, "drive controller failed");
                }
            }
        }

        if let Err(e) = ensemble.update(&mut scene, dt) {
            error!("Wheel update failed: {e}");
            raise_fault(&bb, "wheel update failed");
        }

        {
            let node = scene.get(chassis)?;
            let mut state = bb.write();
            state.chassis = ChassisPose::new(node.position, node.yaw_deg);
            if let Some(controller) = &controller {
                state.velocity = controller.motion().velocity();
                state.angular_velocity = controller.motion().angular_velocity();
            }
            if let Ok(probes) = ensemble.probe(&scene) {
                state.wheels = probes;
            }
        }

        frame += 1;
        if frame % (FRAME_HZ * 2) == 0 {
            let state = snapshot(&bb);
            info!(
                x = format!("{:.2}", state.chassis.position.x),
                z = format!("{:.2}", state.chassis.position.z),
                yaw = format!("{:.1}", state.chassis.yaw_deg),
                v = format!("{:.4}", state.velocity),
                "Chassis"
            );
            for (i, wheel) in state.wheels.iter().enumerate() {
                info!(
                    wheel = i,
                    angle = format!("{:.1}", wheel.arm_angle),
                    flailing = wheel.flailing,
                    "Wheel"
                );
            }
            if !state.faults.is_empty() {
                error!(faults = ?state.faults, "Active faults");
            }
        }

        sleeper.sleep(Duration::from_micros(1_000_000 / FRAME_HZ));
    }
}
