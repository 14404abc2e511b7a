//! Simulation engine for the horde.
//!
//! Owns the hecs ECS world and the combat registry, runs systems once per
//! `tick(dt)`, resolves attacks on demand, and produces `HordeSnapshot`s.

pub mod engine;
pub mod registry;
pub mod systems;
pub mod world_setup;

pub use engine::{HordeEngine, SimConfig};
pub use horde_core as core;

#[cfg(test)]
mod tests;
