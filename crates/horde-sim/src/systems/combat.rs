//! Combat resolution: filter by range and facing, rank by distance, kill the nearest.

use glam::Vec3;
use hecs::{Entity, World};

use horde_core::commands::{AttackQuery, Hit};
use horde_core::components::{Brain, Transform};
use horde_core::config::KnockbackConfig;
use horde_core::enums::Mode;
use horde_core::types::EntityId;

use crate::registry::CombatRegistry;
use crate::systems::knockback;

struct Candidate {
    id: EntityId,
    entity: Entity,
    position: Vec3,
    distance: f32,
    direction: Vec3,
}

/// Resolve one attack against the live registry.
///
/// Kills at most `query.max_targets` entities, nearest first, and knocks each
/// one away from the attacker. The caller records the kills.
pub fn check_attack(
    world: &mut World,
    registry: &CombatRegistry,
    query: &AttackQuery,
    knockback_config: &KnockbackConfig,
) -> Vec<Hit> {
    let facing = query.attacker_facing.normalize_or_zero();

    let mut candidates: Vec<Candidate> = Vec::new();
    for (id, entity) in registry.live() {
        let position = match world.get::<&Transform>(entity) {
            Ok(transform) => transform.position,
            Err(_) => continue,
        };
        let dying = world
            .get::<&Brain>(entity)
            .map_or(true, |brain| brain.mode == Mode::Dying);
        if dying {
            continue;
        }

        let offset = position - query.attacker_position;
        let distance = offset.length();
        if distance > query.range {
            continue;
        }

        let direction = offset.normalize_or_zero();
        if facing.dot(direction) <= query.facing_threshold {
            continue;
        }

        candidates.push(Candidate {
            id,
            entity,
            position,
            distance,
            direction,
        });
    }

    // Stable sort: equal distances keep ascending id order.
    candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    candidates.truncate(query.max_targets);

    candidates
        .into_iter()
        .filter(|c| knockback::trigger_death(world, c.entity, c.direction, knockback_config))
        .map(|c| Hit {
            entity_id: c.id,
            position: c.position,
            distance: c.distance,
        })
        .collect()
}
