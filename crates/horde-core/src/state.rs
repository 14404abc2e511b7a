//! Simulation state snapshot, consumed by the external render/animation layer.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{ActionKind, AnimationHint, Mode};
use crate::events::SimEvent;
use crate::types::{EntityId, SimTime};

/// Everything visible after one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HordeSnapshot {
    pub time: SimTime,
    /// Sorted by id.
    pub entities: Vec<EntityView>,
    /// Events since the previous snapshot.
    pub events: Vec<SimEvent>,
    pub score: ScoreView,
}

/// One entity as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub position: Vec3,
    pub rotation: f32,
    pub mode: Mode,
    pub action: ActionKind,
    pub animation: AnimationHint,
    pub opacity: f32,
}

/// Running totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    pub kills: u32,
    pub alive: u32,
    pub dying: u32,
    pub reinforcements_spawned: u32,
}
