//! Attack input from the external controller layer, and its result.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::CombatConfig;
use crate::types::EntityId;

/// One swing by a player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackQuery {
    pub attacker_position: Vec3,
    /// Unit vector the attacker faces.
    pub attacker_facing: Vec3,
    pub range: f32,
    /// Minimum dot product between facing and direction-to-target.
    pub facing_threshold: f32,
    pub max_targets: usize,
}

impl AttackQuery {
    /// Build a query using the configured range, cone and target cap.
    pub fn with_config(position: Vec3, facing: Vec3, config: &CombatConfig) -> Self {
        Self {
            attacker_position: position,
            attacker_facing: facing.normalize_or_zero(),
            range: config.attack_range,
            facing_threshold: config.facing_threshold,
            max_targets: config.max_targets,
        }
    }
}

/// An entity killed by an attack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub entity_id: EntityId,
    pub position: Vec3,
    pub distance: f32,
}
