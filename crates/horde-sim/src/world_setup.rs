//! Entity spawn factories.

use std::f32::consts::PI;

use glam::Vec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use horde_core::components::{Brain, Transform, Zombie};
use horde_core::config::HordeConfig;
use horde_core::players::PlayerSnapshot;
use horde_core::types::EntityId;

use horde_ai::agent;

use crate::registry::CombatRegistry;
use crate::systems::spawn_placer;

/// Spawn a single entity. Its first tick evaluates a fresh decision.
pub fn spawn_zombie(
    world: &mut World,
    id: EntityId,
    position: Vec3,
    yaw: f32,
    config: &HordeConfig,
) -> hecs::Entity {
    world.spawn((
        Zombie { id },
        Transform { position, yaw },
        Brain::default(),
        agent::initial_decision(&config.behavior),
    ))
}

/// Place `count` entities with the spawn placer, spawn and register them.
/// Returns the new ids.
pub fn spawn_horde(
    world: &mut World,
    registry: &mut CombatRegistry,
    rng: &mut ChaCha8Rng,
    next_id: &mut EntityId,
    count: u32,
    players: &PlayerSnapshot,
    config: &HordeConfig,
) -> Vec<EntityId> {
    let occupied: Vec<Vec3> = if config.spawn.min_entity_spacing.is_some() {
        world
            .query::<(&Zombie, &Transform)>()
            .iter()
            .map(|(_, (_, transform))| transform.position)
            .collect()
    } else {
        Vec::new()
    };

    let points = spawn_placer::generate(count as usize, players, &config.spawn, &occupied, rng);

    let mut ids = Vec::with_capacity(points.len());
    for point in points {
        let id = *next_id;
        *next_id += 1;
        let yaw = rng.gen_range(-PI..PI);
        let entity = spawn_zombie(world, id, point.position, yaw, config);
        registry.register(id, entity);
        ids.push(id);
    }
    ids
}
