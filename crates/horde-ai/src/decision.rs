//! Decision engine: the per-entity behavior state machine.
//!
//! `decide` is a pure function of the entity position, the player snapshot and
//! the entity's `Brain`. The brain is mutated in place; it is the only memory
//! carried between evaluations (target lock, attack-sequence timing).

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use horde_core::components::Brain;
use horde_core::config::BehaviorConfig;
use horde_core::decision::Decision;
use horde_core::enums::Mode;
use horde_core::players::{NearestPlayer, PlayerSnapshot};
use horde_core::types::GroundPlane;

/// Input to the decision engine for a single entity.
pub struct DecisionContext<'a> {
    pub position: Vec3,
    pub players: &'a PlayerSnapshot,
    pub config: &'a BehaviorConfig,
}

/// Evaluate the state machine for one entity and return its next decision.
///
/// `Dying` is terminal: a dying brain is left untouched and gets no decision.
pub fn decide<R: Rng + ?Sized>(
    ctx: &DecisionContext,
    brain: &mut Brain,
    rng: &mut R,
) -> Option<Decision> {
    if brain.mode == Mode::Dying {
        return None;
    }

    let decision = match acquire_target(ctx, brain) {
        Some(target) if target.distance <= ctx.config.chase_radius => engage(ctx, brain, target),
        _ => roam(ctx, brain, rng),
    };
    Some(decision)
}

/// Keep the locked target while it is present and in chase range, otherwise
/// fall back to a fresh nearest-player search.
fn acquire_target(ctx: &DecisionContext, brain: &mut Brain) -> Option<NearestPlayer> {
    if let Some(id) = brain.target_id {
        match ctx.players.get(id) {
            Some(position) => {
                let distance = ctx.position.horizontal_distance(position);
                if distance <= ctx.config.chase_radius {
                    return Some(NearestPlayer {
                        id,
                        position,
                        distance,
                    });
                }
            }
            None => release_target(brain),
        }
    }
    ctx.players.nearest(ctx.position)
}

fn engage(ctx: &DecisionContext, brain: &mut Brain, target: NearestPlayer) -> Decision {
    let config = ctx.config;
    // Ground-leveled: entities never climb toward elevated players.
    let ground_target = Vec3::new(target.position.x, ctx.position.y, target.position.z);
    let locked_on = brain.target_id == Some(target.id)
        && matches!(brain.mode, Mode::Pursuing | Mode::Attacking);

    if target.distance <= config.strike_radius {
        return strike(ctx, brain, target, ground_target);
    }

    brain.attack_elapsed = None;
    if !locked_on {
        brain.mode = Mode::Pursuing;
        brain.target_id = Some(target.id);
        return Decision::scream(ctx.position.yaw_to(ground_target), config.scream_duration);
    }

    brain.mode = Mode::Pursuing;
    Decision::chase(ground_target, config.chase_duration, config.run_speed)
}

/// Attack micro-sequence: rotate, attack until the cycle elapses, brief chase, repeat.
///
/// `attack_elapsed` is the summed length of the completed decisions in the
/// sequence, so the cycle check does not depend on the tick rate.
fn strike(
    ctx: &DecisionContext,
    brain: &mut Brain,
    target: NearestPlayer,
    ground_target: Vec3,
) -> Decision {
    let config = ctx.config;
    let in_sequence = brain.mode == Mode::Attacking && brain.target_id == Some(target.id);

    match brain.attack_elapsed {
        Some(elapsed) if in_sequence && elapsed >= config.attack_cycle => {
            // Leaving attacking mode lets the next evaluation start a fresh sequence.
            brain.mode = Mode::Pursuing;
            brain.attack_elapsed = None;
            Decision::chase(
                ground_target,
                config.attack_cycle_chase_duration,
                config.run_speed,
            )
        }
        Some(_) if in_sequence => Decision::attack(ground_target, config.attack_duration),
        _ => {
            brain.mode = Mode::Attacking;
            brain.target_id = Some(target.id);
            brain.attack_elapsed = Some(0.0);
            Decision::rotate(ctx.position.yaw_to(ground_target), config.rotate_duration)
        }
    }
}

fn roam<R: Rng + ?Sized>(ctx: &DecisionContext, brain: &mut Brain, rng: &mut R) -> Decision {
    let config = ctx.config;
    if matches!(brain.mode, Mode::Pursuing | Mode::Attacking) {
        release_target(brain);
    }

    if rng.gen_bool(config.wander_probability) {
        let angle = rng.gen_range(0.0..TAU);
        let destination =
            ctx.position + Vec3::new(angle.sin(), 0.0, angle.cos()) * config.wander_radius;
        brain.mode = Mode::Wandering;
        Decision::wander(destination, config.wander_duration, config.walk_speed)
    } else {
        brain.mode = Mode::Idle;
        Decision::idle(config.idle_duration)
    }
}

fn release_target(brain: &mut Brain) {
    if matches!(brain.mode, Mode::Pursuing | Mode::Attacking) {
        brain.mode = Mode::Idle;
    }
    brain.target_id = None;
    brain.attack_elapsed = None;
}
