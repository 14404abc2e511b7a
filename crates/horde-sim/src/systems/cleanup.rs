//! Cleanup system: removes entities whose death fade has completed.

use hecs::{Entity, World};

use horde_core::components::{Corpse, Zombie};
use horde_core::events::SimEvent;
use horde_core::types::EntityId;

use crate::registry::CombatRegistry;

/// Despawn faded entities and unregister them from combat.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    registry: &mut CombatRegistry,
    despawn_buffer: &mut Vec<(Entity, EntityId)>,
    events: &mut Vec<SimEvent>,
) {
    despawn_buffer.clear();

    for (entity, (zombie, corpse)) in world.query_mut::<(&Zombie, &Corpse)>() {
        if corpse.faded {
            despawn_buffer.push((entity, zombie.id));
        }
    }

    for (entity, id) in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
        registry.unregister(id);
        tracing::debug!(entity_id = id, "entity removed");
        events.push(SimEvent::Removed { entity_id: id });
    }
}
