use trundle_kinematics::*;

fn main() {
    // One wheel pushed straight ahead at a constant per-frame step, far
    // enough to wrap the arm angle and open the re-anchoring window.
    let config = WheelConfig {
        min_angle: 0.0,
        max_angle: 45.0,
        blend_strength: 0.25,
        adjust_duration: 0.4,
        y_bob: 0.15,
        ..WheelConfig::default()
    };
    let chassis = ChassisPose::new(Vec3::ZERO, 0.0);
    let wheel_start = Vec3::new(0.55, 0.3, 0.0);
    let arm_start = wheel_start + Vec3::new(0.0, 0.25, -0.1);
    let angle_speed = 90.0; // degrees of roll per unit of travel
    let dt = 1.0 / 60.0;
    let step = 0.02; // units per frame

    match WheelKinematics::new(config, wheel_start, arm_start) {
        Ok(mut wheel) => {
            println!("Pushing straight ahead at {} units/frame...", step);
            let mut position = wheel_start;
            let mut arm = arm_start;
            for frame in 1..=40 {
                position += chassis.forward() * step;
                let spin = match wheel.update(position, &chassis, angle_speed, dt) {
                    Ok(spin) => spin,
                    Err(e) => {
                        eprintln!("Error during frame {}: {:?}", frame, e);
                        break;
                    }
                };
                arm = match wheel.update_arm(arm, position, &chassis, dt) {
                    Ok(arm) => arm,
                    Err(e) => {
                        eprintln!("Error during frame {}: {:?}", frame, e);
                        break;
                    }
                };
                println!(
                    "Frame {:>2}: angle {:>6.2}°{} arm {}",
                    frame,
                    wheel.arm_angle(),
                    if spin.wrapped { " (wrapped)" } else { "" },
                    arm
                );
            }
            println!("\nFinal state: {}", wheel);
        }
        Err(e) => {
            eprintln!("Failed to build the wheel: {:?}", e);
        }
    }
}
