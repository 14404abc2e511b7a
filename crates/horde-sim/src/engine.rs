//! Simulation engine for the horde.
//!
//! `HordeEngine` owns the hecs ECS world, the combat registry and the seeded
//! RNG, runs all systems once per `tick`, and produces `HordeSnapshot`s.
//! Completely headless; rendering, networking and input live elsewhere.

use glam::Vec3;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use horde_core::commands::{AttackQuery, Hit};
use horde_core::config::HordeConfig;
use horde_core::error::ConfigError;
use horde_core::events::SimEvent;
use horde_core::players::PlayerSnapshot;
use horde_core::state::HordeSnapshot;
use horde_core::types::{EntityId, SimTime};

use crate::registry::CombatRegistry;
use crate::systems;
use crate::systems::population::ReinforcementSchedule;
use crate::systems::snapshot::ScoreState;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub horde: HordeConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            horde: HordeConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct HordeEngine {
    world: World,
    time: SimTime,
    config: HordeConfig,
    rng: ChaCha8Rng,
    registry: CombatRegistry,
    players: PlayerSnapshot,
    reinforcements: ReinforcementSchedule,
    next_entity_id: EntityId,
    despawn_buffer: Vec<(hecs::Entity, EntityId)>,
    events: Vec<SimEvent>,
    score: ScoreState,
}

impl HordeEngine {
    /// Create a new engine. Fails if the configuration does not validate.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.horde.validate()?;
        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            reinforcements: ReinforcementSchedule::new(&config.horde.population),
            config: config.horde,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            registry: CombatRegistry::new(),
            players: PlayerSnapshot::new(),
            next_entity_id: 0,
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            score: ScoreState::default(),
        })
    }

    /// Replace the player snapshot used from the next tick on.
    pub fn update_players(&mut self, players: PlayerSnapshot) {
        self.players = players;
    }

    /// Place and spawn `count` entities around the current players.
    pub fn populate(&mut self, count: u32) -> Vec<EntityId> {
        let ids = world_setup::spawn_horde(
            &mut self.world,
            &mut self.registry,
            &mut self.rng,
            &mut self.next_entity_id,
            count,
            &self.players,
            &self.config,
        );
        if !ids.is_empty() {
            tracing::info!(spawned = ids.len(), "horde populated");
            self.events.push(SimEvent::PopulationChanged {
                delta: ids.len() as i32,
            });
        }
        ids
    }

    /// Spawn the configured initial population.
    pub fn populate_initial(&mut self) -> Vec<EntityId> {
        self.populate(self.config.population.initial_population)
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    pub fn tick(&mut self, dt: f32) -> HordeSnapshot {
        // 1. Decisions and movement for living entities
        systems::behavior::run(
            &mut self.world,
            &self.players,
            &self.config.behavior,
            dt,
            &mut self.rng,
        );

        // 2. Ballistic flight and fade for dying entities
        systems::knockback::run(&mut self.world, &self.config.knockback, dt);

        // 3. Reinforcements whose delay has elapsed
        let spawned = systems::population::run(
            &mut self.world,
            &mut self.registry,
            &mut self.rng,
            &mut self.reinforcements,
            &mut self.next_entity_id,
            &self.players,
            &self.config,
            &mut self.events,
            dt,
        );
        self.score.reinforcements_spawned += spawned;

        // 4. Remove fully faded entities
        systems::cleanup::run(
            &mut self.world,
            &mut self.registry,
            &mut self.despawn_buffer,
            &mut self.events,
        );

        self.time.advance(dt);

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, events, &self.score)
    }

    /// Resolve one attack immediately. Killed entities start their knockback
    /// and count toward reinforcements.
    pub fn attack(&mut self, query: &AttackQuery) -> Vec<Hit> {
        let hits = systems::combat::check_attack(
            &mut self.world,
            &self.registry,
            query,
            &self.config.knockback,
        );
        for hit in &hits {
            self.record_kill(hit.entity_id);
        }
        hits
    }

    /// Kill an entity by id, knocking it along `direction`.
    ///
    /// Returns false if the id is unknown or the entity is already dying.
    pub fn kill(&mut self, id: EntityId, direction: Vec3) -> bool {
        let Some(entry) = self.registry.get(id) else {
            return false;
        };
        if !entry.alive {
            return false;
        }
        if !systems::knockback::trigger_death(
            &mut self.world,
            entry.entity,
            direction,
            &self.config.knockback,
        ) {
            return false;
        }
        self.record_kill(id);
        true
    }

    fn record_kill(&mut self, id: EntityId) {
        self.registry.mark_dead(id);
        self.score.kills += 1;
        self.events.push(SimEvent::Killed { entity_id: id });
        let batch_queued = self.reinforcements.record_kill();
        tracing::debug!(entity_id = id, kills = self.score.kills, batch_queued, "entity killed");
    }

    // --- Accessors ---

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn time(&self) -> &SimTime {
        &self.time
    }

    pub fn config(&self) -> &HordeConfig {
        &self.config
    }

    pub fn registry(&self) -> &CombatRegistry {
        &self.registry
    }

    pub fn players(&self) -> &PlayerSnapshot {
        &self.players
    }

    pub fn reinforcements(&self) -> &ReinforcementSchedule {
        &self.reinforcements
    }

    /// Mutable world access for tests and scenario setup.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
