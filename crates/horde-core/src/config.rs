//! Runtime configuration.
//!
//! Every tuning value is exposed here. Defaults come from `constants`;
//! JSON documents override only the fields they name.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Complete configuration for one simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HordeConfig {
    pub behavior: BehaviorConfig,
    pub spawn: SpawnConstraints,
    pub combat: CombatConfig,
    pub knockback: KnockbackConfig,
    pub population: PopulationConfig,
}

/// Decision engine and executor tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub chase_radius: f32,
    pub strike_radius: f32,
    pub run_speed: f32,
    pub walk_speed: f32,
    pub rotate_turn_rate: f32,
    pub scream_turn_rate: f32,
    pub rotate_duration: f32,
    pub attack_duration: f32,
    pub attack_cycle: f32,
    pub attack_cycle_chase_duration: f32,
    pub scream_duration: f32,
    pub chase_duration: f32,
    pub idle_duration: f32,
    pub wander_duration: f32,
    pub wander_probability: f64,
    pub wander_radius: f32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            chase_radius: CHASE_RADIUS,
            strike_radius: STRIKE_RADIUS,
            run_speed: RUN_SPEED,
            walk_speed: WALK_SPEED,
            rotate_turn_rate: ROTATE_TURN_RATE,
            scream_turn_rate: SCREAM_TURN_RATE,
            rotate_duration: ROTATE_DURATION,
            attack_duration: ATTACK_DURATION,
            attack_cycle: ATTACK_CYCLE,
            attack_cycle_chase_duration: ATTACK_CYCLE_CHASE_DURATION,
            scream_duration: SCREAM_DURATION,
            chase_duration: CHASE_DURATION,
            idle_duration: IDLE_DURATION,
            wander_duration: WANDER_DURATION,
            wander_probability: WANDER_PROBABILITY,
            wander_radius: WANDER_RADIUS,
        }
    }
}

/// Placement constraints for the spawn placer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConstraints {
    pub min_distance: f32,
    pub max_distance: f32,
    pub world_size: f32,
    pub max_attempts: u32,
    pub edge_fallback_factor: f32,
    pub player_relative_probability: f64,
    pub noise: f32,
    pub spawn_height: f32,
    /// Optional minimum horizontal spacing from other entities.
    pub min_entity_spacing: Option<f32>,
}

impl Default for SpawnConstraints {
    fn default() -> Self {
        Self {
            min_distance: SPAWN_MIN_DISTANCE,
            max_distance: SPAWN_MAX_DISTANCE,
            world_size: WORLD_SIZE,
            max_attempts: SPAWN_MAX_ATTEMPTS,
            edge_fallback_factor: EDGE_FALLBACK_FACTOR,
            player_relative_probability: PLAYER_RELATIVE_PROBABILITY,
            noise: SPAWN_NOISE,
            spawn_height: SPAWN_HEIGHT,
            min_entity_spacing: None,
        }
    }
}

/// Default attack query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub attack_range: f32,
    pub facing_threshold: f32,
    pub max_targets: usize,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            attack_range: ATTACK_RANGE,
            facing_threshold: FACING_THRESHOLD,
            max_targets: MAX_TARGETS_PER_SWING,
        }
    }
}

/// Ballistic death and fade-out tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnockbackConfig {
    pub force: f32,
    pub height: f32,
    pub gravity: f32,
    pub decay: f32,
    pub ground_offset: f32,
    pub grace_period: f32,
    pub fade_duration: f32,
}

impl Default for KnockbackConfig {
    fn default() -> Self {
        Self {
            force: KNOCKBACK_FORCE,
            height: KNOCKBACK_HEIGHT,
            gravity: KNOCKBACK_GRAVITY,
            decay: KNOCKBACK_DECAY,
            ground_offset: GROUND_OFFSET,
            grace_period: DEATH_GRACE,
            fade_duration: FADE_DURATION,
        }
    }
}

/// Reinforcement tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Kills per batch and entities per batch.
    pub respawn_batch_size: u32,
    pub respawn_delay: f32,
    pub initial_population: u32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            respawn_batch_size: RESPAWN_BATCH_SIZE,
            respawn_delay: RESPAWN_DELAY,
            initial_population: INITIAL_POPULATION,
        }
    }
}

impl HordeConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: HordeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.behavior.validate()?;
        self.spawn.validate()?;
        self.combat.validate()?;
        self.knockback.validate()?;
        self.population.validate()
    }
}

impl BehaviorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("behavior.strike_radius", self.strike_radius)?;
        ordered(
            "behavior.strike_radius..chase_radius",
            self.strike_radius,
            self.chase_radius,
        )?;
        non_negative("behavior.run_speed", self.run_speed)?;
        non_negative("behavior.walk_speed", self.walk_speed)?;
        positive("behavior.rotate_turn_rate", self.rotate_turn_rate)?;
        positive("behavior.scream_turn_rate", self.scream_turn_rate)?;
        positive("behavior.rotate_duration", self.rotate_duration)?;
        positive("behavior.attack_duration", self.attack_duration)?;
        positive("behavior.attack_cycle", self.attack_cycle)?;
        positive(
            "behavior.attack_cycle_chase_duration",
            self.attack_cycle_chase_duration,
        )?;
        positive("behavior.scream_duration", self.scream_duration)?;
        positive("behavior.chase_duration", self.chase_duration)?;
        positive("behavior.idle_duration", self.idle_duration)?;
        positive("behavior.wander_duration", self.wander_duration)?;
        probability("behavior.wander_probability", self.wander_probability)?;
        non_negative("behavior.wander_radius", self.wander_radius)
    }
}

impl SpawnConstraints {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("spawn.min_distance", self.min_distance)?;
        ordered(
            "spawn.min_distance..max_distance",
            self.min_distance,
            self.max_distance,
        )?;
        positive("spawn.world_size", self.world_size)?;
        if self.max_attempts == 0 {
            return Err(ConfigError::NonPositive {
                field: "spawn.max_attempts",
                value: 0.0,
            });
        }
        non_negative("spawn.edge_fallback_factor", self.edge_fallback_factor)?;
        probability(
            "spawn.player_relative_probability",
            self.player_relative_probability,
        )?;
        non_negative("spawn.noise", self.noise)?;
        if let Some(spacing) = self.min_entity_spacing {
            non_negative("spawn.min_entity_spacing", spacing)?;
        }
        Ok(())
    }
}

impl CombatConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("combat.attack_range", self.attack_range)
    }
}

impl KnockbackConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("knockback.force", self.force)?;
        non_negative("knockback.height", self.height)?;
        non_negative("knockback.gravity", self.gravity)?;
        non_negative("knockback.decay", self.decay)?;
        non_negative("knockback.grace_period", self.grace_period)?;
        positive("knockback.fade_duration", self.fade_duration)
    }
}

impl PopulationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.respawn_batch_size == 0 {
            return Err(ConfigError::NonPositive {
                field: "population.respawn_batch_size",
                value: 0.0,
            });
        }
        non_negative("population.respawn_delay", self.respawn_delay)
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // NaN fails this check too.
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive {
            field,
            value: f64::from(value),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative {
            field,
            value: f64::from(value),
        })
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { field, min, max })
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Probability { field, value })
    }
}
