//! Behavior system: runs the decision engine and executor for every living entity.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use horde_core::components::{ActiveDecision, Brain, Transform, Zombie};
use horde_core::config::BehaviorConfig;
use horde_core::players::PlayerSnapshot;

use horde_ai::agent;

/// Advance every living entity by `dt`. Dying entities are skipped by `agent::step`.
pub fn run(
    world: &mut World,
    players: &PlayerSnapshot,
    config: &BehaviorConfig,
    dt: f32,
    rng: &mut ChaCha8Rng,
) {
    for (_entity, (_zombie, transform, brain, active)) in
        world.query_mut::<(&Zombie, &mut Transform, &mut Brain, &mut ActiveDecision)>()
    {
        agent::step(transform, brain, active, players, config, dt, rng);
    }
}
