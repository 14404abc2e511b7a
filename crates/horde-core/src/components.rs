//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems and in the horde-ai crate, not components.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::decision::Decision;
use crate::enums::Mode;
use crate::types::{EntityId, PlayerId};

/// Marks a simulated hostile entity and carries its stable id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zombie {
    pub id: EntityId,
}

/// World placement: position plus yaw around the vertical axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Radians, 0 = facing +z.
    pub yaw: f32,
}

/// Persistent per-entity decision memory.
///
/// The only carrier of behavioral continuity between decision evaluations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Brain {
    pub mode: Mode,
    /// Locked player, if pursuing or attacking.
    pub target_id: Option<PlayerId>,
    /// Seconds since the current attack sequence began.
    pub attack_elapsed: Option<f32>,
}

/// The single active decision and how long it has been running.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveDecision {
    pub decision: Decision,
    /// Seconds spent in `decision` so far.
    pub elapsed: f32,
}

/// Ballistic and fade state, attached when an entity starts dying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpse {
    pub velocity: Vec3,
    /// Seconds since the death trigger.
    pub timer: f32,
    /// 1.0 = fully visible, 0.0 = faded out.
    pub opacity: f32,
    pub grounded: bool,
    /// Set once the fade has completed; cleanup removes the entity.
    pub faded: bool,
}
