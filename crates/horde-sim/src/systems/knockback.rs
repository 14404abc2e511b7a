//! Knockback: ballistic flight and fade-out of killed entities.

use glam::Vec3;
use hecs::{Entity, World};

use horde_core::components::{Brain, Corpse, Transform};
use horde_core::config::KnockbackConfig;
use horde_core::enums::Mode;
use horde_core::types::GroundPlane;

/// Death trigger. Switches the entity to `Dying` and launches it along the
/// horizontal part of `direction`.
///
/// Returns false, changing nothing, if the entity is already dying or gone.
pub fn trigger_death(
    world: &mut World,
    entity: Entity,
    direction: Vec3,
    config: &KnockbackConfig,
) -> bool {
    {
        let Ok(mut brain) = world.get::<&mut Brain>(entity) else {
            return false;
        };
        if brain.mode == Mode::Dying {
            return false;
        }
        brain.mode = Mode::Dying;
        brain.target_id = None;
        brain.attack_elapsed = None;
    }

    let velocity = direction.horizontal().normalize_or_zero() * config.force + Vec3::Y * config.height;
    let corpse = Corpse {
        velocity,
        timer: 0.0,
        opacity: 1.0,
        grounded: false,
        faded: false,
    };
    world.insert_one(entity, corpse).is_ok()
}

/// Integrate every corpse by `dt`.
pub fn run(world: &mut World, config: &KnockbackConfig, dt: f32) {
    for (_entity, (transform, corpse)) in world.query_mut::<(&mut Transform, &mut Corpse)>() {
        integrate(transform, corpse, config, dt);
    }
}

/// One step of gravity, drag, ground contact and fade for a single body.
pub fn integrate(transform: &mut Transform, corpse: &mut Corpse, config: &KnockbackConfig, dt: f32) {
    corpse.timer += dt;

    if !corpse.grounded {
        corpse.velocity.y -= config.gravity * dt;
        transform.position += corpse.velocity * dt;

        let damping = (-config.decay * dt).exp();
        corpse.velocity.x *= damping;
        corpse.velocity.z *= damping;

        // Single inelastic stop, no bounce.
        if transform.position.y <= config.ground_offset {
            transform.position.y = config.ground_offset;
            corpse.velocity = Vec3::ZERO;
            corpse.grounded = true;
        }
    }

    if corpse.timer > config.grace_period {
        let progress = (corpse.timer - config.grace_period) / config.fade_duration;
        corpse.opacity = (1.0 - progress).clamp(0.0, 1.0);
    }

    if corpse.opacity <= 0.0 {
        corpse.faded = true;
    }
}
