#![warn(missing_docs)]

//! Per-wheel roll-to-arm kinematics.
//!
//! Each wheel converts its own world-space displacement into visual roll and
//! into a rolling arm angle. The angle lives inside a configured band: when
//! it runs past a bound it wraps to the opposite bound, carrying the
//! overshoot, and the arm re-anchors over a short adjustment window with a
//! vertical bob. Above a speed threshold the arm stops tracking the arc and
//! flails against a fixed directional offset instead.

use core::f64::consts::PI;
use core::fmt;
use libm::{fabs, sin};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::chassis::ChassisPose;
use crate::error::KinematicsError;
use crate::math::{self, Vec3};

/// Shaping curve for the arm adjustment window.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdjustCurve {
    /// Straight interpolation.
    Linear,
    /// Smoothstep ease-in-out.
    #[default]
    EaseInOut,
}

impl AdjustCurve {
    /// Sample the curve at `t`, clamped to `[0, 1]`.
    pub fn sample(&self, t: f64) -> f64 {
        match self {
            AdjustCurve::Linear => t.clamp(0.0, 1.0),
            AdjustCurve::EaseInOut => math::ease_in_out(t),
        }
    }
}

/// Read-only per-wheel tuning.
///
/// Angles are in degrees, distances in world units, durations in seconds.
/// The flail offsets are expressed in the chassis frame.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct WheelConfig {
    /// Lower arm angle bound.
    pub min_angle: f64,
    /// Upper arm angle bound.
    pub max_angle: f64,
    /// Arm angle at construction; must lie within the bounds.
    pub starting_angle: f64,
    /// Per-frame exponential blend toward the arm target, in `(0, 1]`.
    pub blend_strength: f64,
    /// Length of the re-anchoring window (seconds).
    pub adjust_duration: f64,
    /// Peak height of the vertical bob during re-anchoring.
    pub y_bob: f64,
    /// Shaping curve sampled across the window.
    pub adjust_curve: AdjustCurve,
    /// Speed above which the arm flails instead of tracking the arc.
    pub flail_speed: f64,
    /// Chassis-frame arm offset used while flailing backward.
    pub flail_forward: Vec3,
    /// Chassis-frame arm offset used while flailing forward.
    pub flail_backward: Vec3,
}

impl Default for WheelConfig {
    fn default() -> Self {
        WheelConfig {
            min_angle: 0.0,
            max_angle: 45.0,
            starting_angle: 0.0,
            blend_strength: 0.1,
            adjust_duration: 1.0,
            y_bob: 1.0,
            adjust_curve: AdjustCurve::default(),
            flail_speed: 1.0,
            flail_forward: Vec3::ZERO,
            flail_backward: Vec3::ZERO,
        }
    }
}

impl WheelConfig {
    /// Check the tuning for values the wheel machine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::InvalidAngleRange)` if `max_angle` does not exceed `min_angle`.
    /// Returns `Err(KinematicsError::InvalidStartingAngle)` if the starting angle is outside the bounds.
    /// Returns `Err(KinematicsError::InvalidBlendStrength)` if the blend strength is outside `(0, 1]`.
    /// Returns `Err(KinematicsError::InvalidAdjustDuration)` if the window duration is negative.
    /// Returns `Err(KinematicsError::InvalidFlailThreshold)` if the flail speed is negative.
    pub fn validate(&self) -> Result<(), KinematicsError> {
        if self.max_angle <= self.min_angle {
            return Err(KinematicsError::InvalidAngleRange(
                "max_angle must exceed min_angle",
            ));
        }
        if self.starting_angle < self.min_angle || self.starting_angle > self.max_angle {
            return Err(KinematicsError::InvalidStartingAngle(
                "must lie within the angle bounds",
            ));
        }
        if self.blend_strength <= 0.0 || self.blend_strength > 1.0 {
            return Err(KinematicsError::InvalidBlendStrength(
                "must be within (0, 1]",
            ));
        }
        if self.adjust_duration < 0.0 {
            return Err(KinematicsError::InvalidAdjustDuration(
                "must be non-negative",
            ));
        }
        if self.flail_speed < 0.0 {
            return Err(KinematicsError::InvalidFlailThreshold(
                "must be non-negative",
            ));
        }
        Ok(())
    }
}

/// Arm re-anchoring state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArmAdjustment {
    /// The arm tracks the rolling target directly.
    Idle,
    /// The arm is blending from the position at `start_angle` toward the
    /// live target.
    Adjusting {
        /// Time spent in the window so far (seconds); never exceeds the
        /// configured duration.
        elapsed: f64,
        /// Angle the blend starts from, captured when the window opened.
        start_angle: f64,
    },
}

/// Roll produced by one wheel update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelSpin {
    /// Degrees of visual roll to apply to the wheel this frame.
    pub degrees: f64,
    /// Whether the arm angle wrapped past a bound during this update.
    pub wrapped: bool,
}

/// The per-wheel kinematic state machine.
///
/// Construction captures the wheel/arm starting positions; afterwards the
/// owner feeds the wheel its new world position once per frame with
/// [`WheelKinematics::update`] and places the arm with
/// [`WheelKinematics::update_arm`].
#[derive(Debug, Clone, PartialEq)]
pub struct WheelKinematics {
    config: WheelConfig,
    prev_position: Vec3,
    hand_offset: Vec3,
    arm_angle: f64,
    flailing: bool,
    last_signed_distance: f64,
    flail_target: Vec3,
    adjustment: ArmAdjustment,
}

impl WheelKinematics {
    /// Build a wheel unit from its starting world positions.
    ///
    /// The offset between `arm_position` and `wheel_position` is captured
    /// once and becomes the radius of the arm's arc; it is re-expressed
    /// through the chassis orientation every frame afterwards.
    ///
    /// # Errors
    ///
    /// Propagates the tuning checks of [`WheelConfig::validate`].
    pub fn new(
        config: WheelConfig,
        wheel_position: Vec3,
        arm_position: Vec3,
    ) -> Result<Self, KinematicsError> {
        config.validate()?;
        Ok(WheelKinematics {
            prev_position: wheel_position,
            hand_offset: arm_position - wheel_position,
            arm_angle: config.starting_angle,
            flailing: false,
            last_signed_distance: 0.0,
            flail_target: arm_position,
            adjustment: ArmAdjustment::Idle,
            config,
        })
    }

    /// Current rolling arm angle (degrees).
    pub fn arm_angle(&self) -> f64 {
        self.arm_angle
    }

    /// Overwrite the rolling arm angle.
    ///
    /// Used by ensemble synchronization; callers keep the value within the
    /// configured bounds.
    pub fn set_arm_angle(&mut self, angle: f64) {
        self.arm_angle = angle;
    }

    /// Whether the last update exceeded the flail speed threshold.
    pub fn is_flailing(&self) -> bool {
        self.flailing
    }

    /// Current re-anchoring state.
    pub fn adjustment(&self) -> ArmAdjustment {
        self.adjustment
    }

    /// Signed distance covered by the last update (negative when rolling
    /// backward).
    pub fn last_distance(&self) -> f64 {
        self.last_signed_distance
    }

    /// The wheel's tuning.
    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// Open the re-anchoring window from the current angle.
    pub fn start_adjustment(&mut self) {
        self.begin_adjustment(self.arm_angle);
    }

    fn begin_adjustment(&mut self, start_angle: f64) {
        self.adjustment = ArmAdjustment::Adjusting {
            elapsed: 0.0,
            start_angle,
        };
    }

    /// Advance the roll state from the wheel's new world position.
    ///
    /// Displacement against the chassis forward direction (more than 90°
    /// apart) counts as rolling backward. The returned spin is the visual
    /// roll for the caller to apply about the wheel's right axis.
    ///
    /// A zero-length displacement has no direction; it leaves the angle,
    /// the flail state, and the roll untouched rather than feeding a zero
    /// vector into the angle computation.
    ///
    /// The bound check runs once per update. A displacement large enough to
    /// cross a bound twice in a single frame under-counts by one span; keep
    /// per-frame displacements below the angle band.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::NegativeTimeDelta)` if `dt` is negative.
    pub fn update(
        &mut self,
        wheel_position: Vec3,
        chassis: &ChassisPose,
        angle_speed: f64,
        dt: f64,
    ) -> Result<WheelSpin, KinematicsError> {
        if dt < 0.0 {
            return Err(KinematicsError::NegativeTimeDelta("must be non-negative"));
        }

        let delta = wheel_position - self.prev_position;
        let distance = delta.magnitude();
        if distance == 0.0 {
            return Ok(WheelSpin::default());
        }

        let facing = math::angle_between_deg(chassis.forward(), delta);
        let signed = if facing > 90.0 { -distance } else { distance };
        let spin = signed * angle_speed;

        self.arm_angle += spin;
        let mut wrapped = false;
        if self.arm_angle > self.config.max_angle {
            let pre_wrap = self.arm_angle;
            self.arm_angle = self.config.min_angle + (self.arm_angle - self.config.max_angle);
            self.begin_adjustment(pre_wrap);
            wrapped = true;
        }
        if self.arm_angle < self.config.min_angle {
            let pre_wrap = self.arm_angle;
            self.arm_angle = self.config.max_angle - (self.config.min_angle - self.arm_angle);
            self.begin_adjustment(pre_wrap);
            wrapped = true;
        }

        self.prev_position = wheel_position;
        self.flailing = fabs(signed) > self.config.flail_speed * dt;
        self.last_signed_distance = signed;

        // Moving forward throws the arm backward.
        let offset = if signed >= 0.0 {
            self.config.flail_backward
        } else {
            self.config.flail_forward
        };
        self.flail_target = wheel_position + chassis.rotate_to_world(offset);

        Ok(WheelSpin {
            degrees: spin,
            wrapped,
        })
    }

    /// World position of the arm at `angle` along its arc.
    fn angle_position(&self, angle: f64, wheel_position: Vec3, chassis: &ChassisPose) -> Vec3 {
        let oriented = chassis.rotate_to_world(self.hand_offset);
        wheel_position + math::rotate_about_axis(oriented, chassis.right(), angle)
    }

    /// Produce this frame's arm position.
    ///
    /// Flailing overrides everything; an open adjustment window blends from
    /// its start angle to the live target and adds the vertical bob; the
    /// result is always an exponential blend from `current_arm` by the
    /// configured strength, so the arm follows with a one-frame lag even at
    /// rest.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::NegativeTimeDelta)` if `dt` is negative.
    pub fn update_arm(
        &mut self,
        current_arm: Vec3,
        wheel_position: Vec3,
        chassis: &ChassisPose,
        dt: f64,
    ) -> Result<Vec3, KinematicsError> {
        if dt < 0.0 {
            return Err(KinematicsError::NegativeTimeDelta("must be non-negative"));
        }

        let mut target = self.angle_position(self.arm_angle, wheel_position, chassis);

        if self.flailing {
            target = self.flail_target;
        } else if let ArmAdjustment::Adjusting {
            elapsed,
            start_angle,
        } = self.adjustment
        {
            let duration = self.config.adjust_duration;
            // A zero-length window is already complete; never divide by it.
            let (elapsed, sample) = if duration > 0.0 {
                let elapsed = (elapsed + dt).min(duration);
                (elapsed, self.config.adjust_curve.sample(elapsed / duration))
            } else {
                (duration, 1.0)
            };

            let bob = Vec3::UP * (sin(sample * PI) * self.config.y_bob);
            let start = self.angle_position(start_angle, wheel_position, chassis);
            target = start.lerp(target, sample) + bob;

            self.adjustment = if elapsed >= duration {
                ArmAdjustment::Idle
            } else {
                ArmAdjustment::Adjusting {
                    elapsed,
                    start_angle,
                }
            };
        }

        Ok(current_arm.lerp(target, self.config.blend_strength))
    }
}

impl fmt::Display for WheelKinematics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(angle: {:.1}°, flailing: {}, moved: {:.3})",
            self.arm_angle, self.flailing, self.last_signed_distance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    const EPSILON: f64 = 1e-9;

    const ANGLE_SPEED: f64 = 10.0;
    const DT: f64 = 0.1;

    fn config() -> WheelConfig {
        WheelConfig {
            min_angle: 0.0,
            max_angle: 45.0,
            blend_strength: 1.0,
            flail_speed: 100.0,
            flail_forward: Vec3::new(0.0, 0.0, 0.4),
            flail_backward: Vec3::new(0.0, 0.0, -0.4),
            ..WheelConfig::default()
        }
    }

    fn wheel_at(config: WheelConfig, position: Vec3) -> WheelKinematics {
        let arm = position + Vec3::new(0.0, 0.5, 0.0);
        WheelKinematics::new(config, position, arm).unwrap()
    }

    fn roll(wheel: &mut WheelKinematics, to: Vec3) -> WheelSpin {
        let chassis = ChassisPose::default();
        wheel.update(to, &chassis, ANGLE_SPEED, DT).unwrap()
    }

    #[test]
    fn test_validate_rejects_bad_tuning() {
        let bad_range = WheelConfig {
            min_angle: 10.0,
            max_angle: 10.0,
            ..WheelConfig::default()
        };
        assert!(matches!(
            bad_range.validate(),
            Err(KinematicsError::InvalidAngleRange(_))
        ));

        let bad_start = WheelConfig {
            starting_angle: 90.0,
            ..WheelConfig::default()
        };
        assert!(matches!(
            bad_start.validate(),
            Err(KinematicsError::InvalidStartingAngle(_))
        ));

        let bad_blend = WheelConfig {
            blend_strength: 0.0,
            ..WheelConfig::default()
        };
        assert!(matches!(
            bad_blend.validate(),
            Err(KinematicsError::InvalidBlendStrength(_))
        ));

        let bad_duration = WheelConfig {
            adjust_duration: -1.0,
            ..WheelConfig::default()
        };
        assert!(matches!(
            bad_duration.validate(),
            Err(KinematicsError::InvalidAdjustDuration(_))
        ));

        let bad_flail = WheelConfig {
            flail_speed: -1.0,
            ..WheelConfig::default()
        };
        assert!(matches!(
            bad_flail.validate(),
            Err(KinematicsError::InvalidFlailThreshold(_))
        ));

        assert!(WheelConfig::default().validate().is_ok());
    }

    #[test]
    fn test_forward_roll_accumulates_angle() {
        let mut wheel = wheel_at(config(), Vec3::ZERO);
        // 0.5 units along chassis forward at 10 °/unit: +5° of roll.
        let spin = roll(&mut wheel, Vec3::new(0.0, 0.0, 0.5));
        assert!((spin.degrees - 5.0).abs() < EPSILON);
        assert!(!spin.wrapped);
        assert!((wheel.arm_angle() - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_backward_roll_negates_angle() {
        let mut wheel = wheel_at(
            WheelConfig {
                starting_angle: 10.0,
                ..config()
            },
            Vec3::ZERO,
        );
        // Displacement opposing chassis forward (angle 180° > 90°): -5°.
        let spin = roll(&mut wheel, Vec3::new(0.0, 0.0, -0.5));
        assert!((spin.degrees + 5.0).abs() < EPSILON);
        assert!((wheel.arm_angle() - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_wrap_carries_overshoot_past_max() {
        let mut wheel = wheel_at(
            WheelConfig {
                starting_angle: 40.0,
                ..config()
            },
            Vec3::ZERO,
        );
        // 40 + 10 = 50, overshoot 5 past max 45: lands at min + 5 = 5.
        let spin = roll(&mut wheel, Vec3::new(0.0, 0.0, 1.0));
        assert!(spin.wrapped);
        assert!((wheel.arm_angle() - 5.0).abs() < EPSILON);
        // The window opens from the pre-wrap angle with a fresh clock.
        match wheel.adjustment() {
            ArmAdjustment::Adjusting {
                elapsed,
                start_angle,
            } => {
                assert_eq!(elapsed, 0.0);
                assert!((start_angle - 50.0).abs() < EPSILON);
            }
            ArmAdjustment::Idle => panic!("wrap must open the adjustment window"),
        }
    }

    #[test]
    fn test_wrap_carries_overshoot_past_min() {
        let mut wheel = wheel_at(
            WheelConfig {
                starting_angle: 5.0,
                ..config()
            },
            Vec3::ZERO,
        );
        // 5 - 10 = -5, overshoot 5 past min 0: lands at max - 5 = 40.
        let spin = roll(&mut wheel, Vec3::new(0.0, 0.0, -1.0));
        assert!(spin.wrapped);
        assert!((wheel.arm_angle() - 40.0).abs() < EPSILON);
        assert!(matches!(
            wheel.adjustment(),
            ArmAdjustment::Adjusting { elapsed, .. } if elapsed == 0.0
        ));
    }

    #[test]
    fn test_angle_stays_in_bounds_across_a_push() {
        let mut wheel = wheel_at(config(), Vec3::ZERO);
        let steps = [0.7, 1.3, -0.4, 2.1, 3.9, -1.8, 0.05, 4.2, -3.3, 1.1];
        let mut z = 0.0;
        for step in steps {
            z += step;
            roll(&mut wheel, Vec3::new(0.0, 0.0, z));
            let angle = wheel.arm_angle();
            assert!(
                (0.0..=45.0).contains(&angle),
                "angle {} escaped the band",
                angle
            );
        }
    }

    #[test]
    fn test_single_wrap_undercounts_double_crossing() {
        // The bound check runs once per update: a displacement spanning the
        // band twice (40 + 100 = 140 -> wraps once to 95) leaves the angle
        // above max until a later update wraps it back. Documented behavior,
        // not a defect to fix silently.
        let mut wheel = wheel_at(
            WheelConfig {
                starting_angle: 40.0,
                ..config()
            },
            Vec3::ZERO,
        );
        let spin = roll(&mut wheel, Vec3::new(0.0, 0.0, 10.0));
        assert!(spin.wrapped);
        assert!((wheel.arm_angle() - 95.0).abs() < EPSILON);
    }

    #[test]
    fn test_zero_displacement_is_a_no_op() {
        let mut wheel = wheel_at(
            WheelConfig {
                starting_angle: 12.0,
                ..config()
            },
            Vec3::ZERO,
        );
        roll(&mut wheel, Vec3::new(0.0, 0.0, 0.3));
        let angle = wheel.arm_angle();
        let flailing = wheel.is_flailing();

        let spin = roll(&mut wheel, Vec3::new(0.0, 0.0, 0.3));
        assert_eq!(spin, WheelSpin::default());
        assert_eq!(wheel.arm_angle(), angle);
        assert_eq!(wheel.is_flailing(), flailing);
        assert!(wheel.arm_angle().is_finite());
    }

    #[test]
    fn test_flail_trips_above_threshold() {
        let tuned = WheelConfig {
            flail_speed: 1.0,
            ..config()
        };
        // Threshold distance is flail_speed * dt = 0.1.
        let mut wheel = wheel_at(tuned.clone(), Vec3::ZERO);
        roll(&mut wheel, Vec3::new(0.0, 0.0, 0.05));
        assert!(!wheel.is_flailing());

        let mut wheel = wheel_at(tuned, Vec3::ZERO);
        roll(&mut wheel, Vec3::new(0.0, 0.0, 0.5));
        assert!(wheel.is_flailing());
    }

    #[test]
    fn test_forward_flail_selects_backward_offset() {
        let tuned = WheelConfig {
            flail_speed: 1.0,
            ..config()
        };
        let chassis = ChassisPose::default();
        let mut wheel = wheel_at(tuned.clone(), Vec3::ZERO);
        let position = Vec3::new(0.0, 0.0, 0.5);
        wheel.update(position, &chassis, ANGLE_SPEED, DT).unwrap();
        assert!(wheel.last_distance() > 0.0);

        // Blend strength 1 applies the target exactly: wheel position plus
        // the *backward* offset, the deliberate recoil inversion.
        let arm = wheel
            .update_arm(Vec3::ZERO, position, &chassis, DT)
            .unwrap();
        let expected = position + tuned.flail_backward;
        assert!((arm - expected).magnitude() < EPSILON);
    }

    #[test]
    fn test_backward_flail_selects_forward_offset() {
        let tuned = WheelConfig {
            starting_angle: 20.0,
            flail_speed: 1.0,
            ..config()
        };
        let chassis = ChassisPose::default();
        let mut wheel = wheel_at(tuned.clone(), Vec3::ZERO);
        let position = Vec3::new(0.0, 0.0, -0.5);
        wheel.update(position, &chassis, ANGLE_SPEED, DT).unwrap();
        assert!(wheel.last_distance() < 0.0);

        let arm = wheel
            .update_arm(Vec3::ZERO, position, &chassis, DT)
            .unwrap();
        let expected = position + tuned.flail_forward;
        assert!((arm - expected).magnitude() < EPSILON);
    }

    #[test]
    fn test_adjustment_bob_peaks_mid_window() {
        let mut wheel = wheel_at(config(), Vec3::ZERO);
        let chassis = ChassisPose::default();
        wheel.start_adjustment();

        // Start angle equals the live angle, so start and target coincide:
        // the only displacement is the bob. At the window midpoint the
        // smoothstep sample is 0.5 and sin(0.5 * PI) = 1, the full bob.
        let resting = wheel
            .clone()
            .update_arm(Vec3::ZERO, Vec3::ZERO, &chassis, 0.0)
            .unwrap();
        let mid = wheel
            .update_arm(Vec3::ZERO, Vec3::ZERO, &chassis, 0.5)
            .unwrap();
        assert!(((mid - resting).y - 1.0).abs() < EPSILON);
        assert!(matches!(
            wheel.adjustment(),
            ArmAdjustment::Adjusting { elapsed, .. } if (elapsed - 0.5).abs() < EPSILON
        ));
    }

    #[test]
    fn test_adjustment_closes_exactly_at_duration() {
        let mut wheel = wheel_at(config(), Vec3::ZERO);
        let chassis = ChassisPose::default();
        wheel.start_adjustment();

        wheel
            .update_arm(Vec3::ZERO, Vec3::ZERO, &chassis, 0.5)
            .unwrap();
        // Second half lands elapsed exactly on the 1.0 s duration: Idle, and
        // the bob is back to zero (sin PI).
        let end = wheel
            .update_arm(Vec3::ZERO, Vec3::ZERO, &chassis, 0.5)
            .unwrap();
        assert!(matches!(wheel.adjustment(), ArmAdjustment::Idle));
        let resting = wheel
            .update_arm(Vec3::ZERO, Vec3::ZERO, &chassis, 0.5)
            .unwrap();
        assert!((end - resting).magnitude() < 1e-12);
    }

    #[test]
    fn test_adjustment_elapsed_never_exceeds_duration() {
        let mut wheel = wheel_at(config(), Vec3::ZERO);
        let chassis = ChassisPose::default();
        wheel.start_adjustment();
        // One oversized step is clamped to the window and closes it.
        wheel
            .update_arm(Vec3::ZERO, Vec3::ZERO, &chassis, 10.0)
            .unwrap();
        assert!(matches!(wheel.adjustment(), ArmAdjustment::Idle));
    }

    #[test]
    fn test_zero_duration_window_completes_without_nan() {
        let mut wheel = wheel_at(
            WheelConfig {
                adjust_duration: 0.0,
                ..config()
            },
            Vec3::ZERO,
        );
        let chassis = ChassisPose::default();
        wheel.start_adjustment();
        let arm = wheel
            .update_arm(Vec3::ZERO, Vec3::ZERO, &chassis, DT)
            .unwrap();
        assert!(arm.x.is_finite() && arm.y.is_finite() && arm.z.is_finite());
        assert!(matches!(wheel.adjustment(), ArmAdjustment::Idle));
    }

    #[test]
    fn test_arm_follows_with_exponential_lag() {
        let mut wheel = wheel_at(
            WheelConfig {
                blend_strength: 0.25,
                ..config()
            },
            Vec3::ZERO,
        );
        let chassis = ChassisPose::default();
        let target = wheel
            .clone()
            .update_arm(Vec3::new(0.0, 0.5, 0.0), Vec3::ZERO, &chassis, DT)
            .unwrap();
        // At rest the target is the arc position itself; a displaced arm
        // covers a quarter of the gap per frame.
        let far = Vec3::new(1.0, 0.5, 0.0);
        let blended = wheel.update_arm(far, Vec3::ZERO, &chassis, DT).unwrap();
        assert!((blended - far.lerp(target, 0.25)).magnitude() < EPSILON);
    }

    #[test]
    fn test_arm_arc_tracks_chassis_orientation() {
        // Same wheel state, chassis turned 90°: the captured hand offset is
        // re-expressed in the new orientation, not frozen in world space.
        let offset = Vec3::new(0.0, 0.0, 0.3);
        let wheel_pos = Vec3::ZERO;
        let mut wheel =
            WheelKinematics::new(config(), wheel_pos, wheel_pos + offset).unwrap();
        let turned = ChassisPose::new(Vec3::ZERO, 90.0);
        let arm = wheel
            .update_arm(Vec3::ZERO, wheel_pos, &turned, DT)
            .unwrap();
        // Local +Z maps to world +X under a 90° yaw.
        assert!((arm - Vec3::new(0.3, 0.0, 0.0)).magnitude() < EPSILON);
    }

    #[test]
    fn test_negative_dt_is_rejected() {
        let mut wheel = wheel_at(config(), Vec3::ZERO);
        let chassis = ChassisPose::default();
        assert!(matches!(
            wheel.update(Vec3::ZERO, &chassis, ANGLE_SPEED, -0.1),
            Err(KinematicsError::NegativeTimeDelta(_))
        ));
        assert!(matches!(
            wheel.update_arm(Vec3::ZERO, Vec3::ZERO, &chassis, -0.1),
            Err(KinematicsError::NegativeTimeDelta(_))
        ));
    }
}
