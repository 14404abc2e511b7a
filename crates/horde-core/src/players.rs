//! Read-only player snapshot supplied by the external networking layer.

use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::{GroundPlane, PlayerId};

/// Player positions for one tick, keyed by id.
///
/// Ordered by id so "first player" and iteration order are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    players: BTreeMap<PlayerId, Vec3>,
}

/// Result of a nearest-player lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPlayer {
    pub id: PlayerId,
    pub position: Vec3,
    /// Horizontal distance from the query point.
    pub distance: f32,
}

impl PlayerSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: PlayerId, position: Vec3) {
        self.players.insert(id, position);
    }

    pub fn remove(&mut self, id: PlayerId) -> Option<Vec3> {
        self.players.remove(&id)
    }

    pub fn get(&self, id: PlayerId) -> Option<Vec3> {
        self.players.get(&id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Lowest-id player.
    pub fn first(&self) -> Option<(PlayerId, Vec3)> {
        self.players.iter().next().map(|(&id, &pos)| (id, pos))
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, Vec3)> + '_ {
        self.players.iter().map(|(&id, &pos)| (id, pos))
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.players.values().copied()
    }

    /// Nearest player by horizontal distance. Ties go to the lower id.
    pub fn nearest(&self, from: Vec3) -> Option<NearestPlayer> {
        let mut best: Option<NearestPlayer> = None;
        for (id, position) in self.iter() {
            let distance = from.horizontal_distance(position);
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(NearestPlayer {
                    id,
                    position,
                    distance,
                });
            }
        }
        best
    }
}

impl FromIterator<(PlayerId, Vec3)> for PlayerSnapshot {
    fn from_iter<I: IntoIterator<Item = (PlayerId, Vec3)>>(iter: I) -> Self {
        Self {
            players: iter.into_iter().collect(),
        }
    }
}
