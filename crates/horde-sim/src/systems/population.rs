//! Population control: kill counting and delayed reinforcement batches.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use horde_core::config::{HordeConfig, PopulationConfig};
use horde_core::events::SimEvent;
use horde_core::players::PlayerSnapshot;
use horde_core::types::EntityId;

use crate::registry::CombatRegistry;
use crate::world_setup;

/// A reinforcement batch waiting for its delay to elapse.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingBatch {
    pub remaining_secs: f32,
    pub count: u32,
}

/// Rolling kill counter. Every `batch_size` kills earns a batch of
/// `batch_size` new entities after `delay` seconds.
#[derive(Debug, Clone)]
pub struct ReinforcementSchedule {
    batch_size: u32,
    delay: f32,
    kills_toward_batch: u32,
    pending: Vec<PendingBatch>,
}

impl ReinforcementSchedule {
    pub fn new(config: &PopulationConfig) -> Self {
        Self {
            batch_size: config.respawn_batch_size,
            delay: config.respawn_delay,
            kills_toward_batch: 0,
            pending: Vec::new(),
        }
    }

    /// Count one kill. Returns true if it completed a batch.
    pub fn record_kill(&mut self) -> bool {
        self.kills_toward_batch += 1;
        if self.kills_toward_batch < self.batch_size {
            return false;
        }
        self.kills_toward_batch -= self.batch_size;
        self.pending.push(PendingBatch {
            remaining_secs: self.delay,
            count: self.batch_size,
        });
        true
    }

    /// Advance timers and return how many entities are now due.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let mut due = 0;
        self.pending.retain_mut(|batch| {
            batch.remaining_secs -= dt;
            if batch.remaining_secs <= 0.0 {
                due += batch.count;
                false
            } else {
                true
            }
        });
        due
    }

    pub fn pending(&self) -> &[PendingBatch] {
        &self.pending
    }

    pub fn kills_toward_batch(&self) -> u32 {
        self.kills_toward_batch
    }
}

/// Spawn any reinforcement batches that came due this tick.
/// Returns the number of entities spawned.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    registry: &mut CombatRegistry,
    rng: &mut ChaCha8Rng,
    schedule: &mut ReinforcementSchedule,
    next_id: &mut EntityId,
    players: &PlayerSnapshot,
    config: &HordeConfig,
    events: &mut Vec<SimEvent>,
    dt: f32,
) -> u32 {
    let due = schedule.advance(dt);
    if due == 0 {
        return 0;
    }

    let ids = world_setup::spawn_horde(world, registry, rng, next_id, due, players, config);
    let spawned = ids.len() as u32;
    tracing::info!(spawned, population = registry.len(), "reinforcements arrived");
    events.push(SimEvent::PopulationChanged {
        delta: spawned as i32,
    });
    spawned
}
