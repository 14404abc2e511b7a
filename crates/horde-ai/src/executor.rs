//! Behavior executor: integrates the active decision into position and yaw.

use glam::Vec3;

use horde_core::components::Transform;
use horde_core::config::BehaviorConfig;
use horde_core::decision::{Action, Decision};
use horde_core::types::{wrap_angle, yaw_of, GroundPlane};

/// Gaps smaller than this count as arrived.
const ARRIVE_EPSILON: f32 = 1e-3;

/// Apply one tick of `decision` to `transform`.
pub fn execute(decision: &Decision, transform: &mut Transform, dt: f32, config: &BehaviorConfig) {
    match decision.action {
        Action::Idle => {}
        Action::Wander { target } => steer(transform, target, decision.speed * dt, 0.0),
        Action::Chase { target } => {
            steer(transform, target, decision.speed * dt, config.strike_radius);
        }
        Action::Attack { target } => face(transform, target),
        Action::Rotate { yaw } => turn_toward(transform, yaw, config.rotate_turn_rate * dt),
        Action::Scream { yaw } => turn_toward(transform, yaw, config.scream_turn_rate * dt),
    }
}

/// Face `target` and move toward it, stopping `stop_distance` short.
///
/// Facing is updated even when movement is suppressed, so an entity standing
/// at strike range keeps looking at its target.
fn steer(transform: &mut Transform, target: Vec3, max_step: f32, stop_distance: f32) {
    let offset = (target - transform.position).horizontal();
    let direction = offset.normalize_or_zero();
    if direction == Vec3::ZERO {
        return;
    }
    transform.yaw = yaw_of(direction);

    let distance = offset.length();
    if distance - stop_distance > ARRIVE_EPSILON {
        let step = max_step.min(distance - stop_distance);
        transform.position += direction * step;
    }
}

fn face(transform: &mut Transform, target: Vec3) {
    let direction = (target - transform.position).horizontal().normalize_or_zero();
    if direction != Vec3::ZERO {
        transform.yaw = yaw_of(direction);
    }
}

/// Rotate along the shortest arc, never past `target_yaw`.
pub fn turn_toward(transform: &mut Transform, target_yaw: f32, max_step: f32) {
    let delta = wrap_angle(target_yaw - transform.yaw);
    if delta.abs() <= max_step {
        transform.yaw = wrap_angle(target_yaw);
    } else {
        transform.yaw = wrap_angle(transform.yaw + max_step.copysign(delta));
    }
}
