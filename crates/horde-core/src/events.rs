//! Events emitted by the simulation for scoring and scene management.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// Entity was killed. Emitted immediately, before the body fades.
    Killed { entity_id: EntityId },
    /// Entity finished fading and was removed from the world.
    Removed { entity_id: EntityId },
    /// Entities were added to the population.
    PopulationChanged { delta: i32 },
}
