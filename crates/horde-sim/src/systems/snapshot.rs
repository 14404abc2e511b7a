//! Snapshot system: queries the ECS world and builds a `HordeSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use horde_core::components::{ActiveDecision, Brain, Corpse, Transform, Zombie};
use horde_core::enums::{AnimationHint, Mode};
use horde_core::events::SimEvent;
use horde_core::state::{EntityView, HordeSnapshot, ScoreView};
use horde_core::types::SimTime;

/// Running totals kept by the engine.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub kills: u32,
    pub reinforcements_spawned: u32,
}

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    events: Vec<SimEvent>,
    score: &ScoreState,
) -> HordeSnapshot {
    let entities = build_entities(world);
    let dying = entities.iter().filter(|e| e.mode == Mode::Dying).count() as u32;
    let alive = entities.len() as u32 - dying;

    HordeSnapshot {
        time: *time,
        entities,
        events,
        score: ScoreView {
            kills: score.kills,
            alive,
            dying,
            reinforcements_spawned: score.reinforcements_spawned,
        },
    }
}

fn build_entities(world: &World) -> Vec<EntityView> {
    let mut views: Vec<EntityView> = world
        .query::<(&Zombie, &Transform, &Brain, &ActiveDecision, Option<&Corpse>)>()
        .iter()
        .map(|(_, (zombie, transform, brain, active, corpse))| {
            let action = active.decision.kind();
            EntityView {
                id: zombie.id,
                position: transform.position,
                rotation: transform.yaw,
                mode: brain.mode,
                action,
                animation: AnimationHint::from_state(brain.mode, action),
                opacity: corpse.map_or(1.0, |c| c.opacity),
            }
        })
        .collect();

    views.sort_by_key(|v| v.id);
    views
}
