//! Entity behavior for the horde simulation.
//!
//! Implements the per-entity decision state machine and the executor that
//! turns a decision into movement and rotation. No ECS dependency:
//! everything operates on plain data from horde-core.

pub mod agent;
pub mod decision;
pub mod executor;

pub use horde_core as core;
