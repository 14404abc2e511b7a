//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! They do not own state; persistent state lives in components or in the engine.

pub mod behavior;
pub mod cleanup;
pub mod combat;
pub mod knockback;
pub mod population;
pub mod snapshot;
pub mod spawn_placer;
