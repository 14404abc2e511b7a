//! Default tuning values.
//!
//! These seed `HordeConfig::default()`. None of them is authoritative;
//! every one can be overridden through configuration.

use std::f32::consts::PI;

/// Nominal simulation tick rate (Hz) used by headless drivers.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Perception ---

/// Distance at which an entity notices and starts pursuing a player (m).
pub const CHASE_RADIUS: f32 = 15.0;

/// Distance at which a pursuing entity starts its attack sequence (m).
pub const STRIKE_RADIUS: f32 = 1.5;

// --- Locomotion ---

/// Chase speed (m/s).
pub const RUN_SPEED: f32 = 3.0;

/// Wander speed (m/s).
pub const WALK_SPEED: f32 = 1.0;

/// Turn rate while rotating to strike (rad/s).
pub const ROTATE_TURN_RATE: f32 = PI;

/// Turn rate while screaming (rad/s). Faster than `ROTATE_TURN_RATE`.
pub const SCREAM_TURN_RATE: f32 = 2.0 * PI;

// --- Decision durations (seconds) ---

pub const ROTATE_DURATION: f32 = 0.5;
pub const ATTACK_DURATION: f32 = 1.0;
/// Length of one attack sequence before a brief re-chase.
pub const ATTACK_CYCLE: f32 = 1.5;
pub const ATTACK_CYCLE_CHASE_DURATION: f32 = 0.3;
pub const SCREAM_DURATION: f32 = 1.5;
pub const CHASE_DURATION: f32 = 0.5;
pub const IDLE_DURATION: f32 = 2.0;
pub const WANDER_DURATION: f32 = 2.0;

// --- Wandering ---

/// Probability of wandering instead of idling when no player is near.
pub const WANDER_PROBABILITY: f64 = 0.3;

/// Fixed distance of a wander destination from the current position (m).
pub const WANDER_RADIUS: f32 = 5.0;

// --- Spawning ---

pub const SPAWN_MIN_DISTANCE: f32 = 20.0;
pub const SPAWN_MAX_DISTANCE: f32 = 40.0;

/// Side length of the square arena centered on the origin (m).
pub const WORLD_SIZE: f32 = 100.0;

pub const SPAWN_MAX_ATTEMPTS: u32 = 30;

/// Fallback spawn distance as a fraction of `WORLD_SIZE`.
pub const EDGE_FALLBACK_FACTOR: f32 = 0.45;

/// Probability that a candidate is sampled around a player rather than uniformly.
pub const PLAYER_RELATIVE_PROBABILITY: f64 = 0.7;

/// Half-width of the noise added to player-relative candidates (m).
pub const SPAWN_NOISE: f32 = 1.0;

/// Vertical coordinate of freshly spawned entities (m).
pub const SPAWN_HEIGHT: f32 = 0.0;

// --- Combat ---

pub const ATTACK_RANGE: f32 = 4.0;
pub const FACING_THRESHOLD: f32 = 0.3;
pub const MAX_TARGETS_PER_SWING: usize = 1;

// --- Knockback ---

/// Horizontal launch speed of a killed entity (m/s).
pub const KNOCKBACK_FORCE: f32 = 8.0;

/// Vertical launch speed of a killed entity (m/s).
pub const KNOCKBACK_HEIGHT: f32 = 5.0;

pub const KNOCKBACK_GRAVITY: f32 = 20.0;

/// Exponential decay rate of horizontal knockback velocity (1/s).
pub const KNOCKBACK_DECAY: f32 = 2.0;

/// Lowest vertical position a body may reach (m).
pub const GROUND_OFFSET: f32 = 0.0;

/// Seconds a body lies still before fading.
pub const DEATH_GRACE: f32 = 2.0;

/// Seconds the linear opacity fade takes.
pub const FADE_DURATION: f32 = 1.0;

// --- Population ---

/// Kills per reinforcement batch, and entities per batch.
pub const RESPAWN_BATCH_SIZE: u32 = 3;

/// Seconds between a batch being earned and spawning.
pub const RESPAWN_DELAY: f32 = 2.0;

pub const INITIAL_POPULATION: u32 = 10;
