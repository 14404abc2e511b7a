//! Spawn placement by rejection sampling with a guaranteed fallback.
//!
//! Candidates are either sampled on a ring around a random player or uniformly
//! inside the arena, then accepted only if every player is within
//! `[min_distance, max_distance]` on the ground plane. Exhausting the attempt
//! budget falls back to an arena-edge point, so placement never fails.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use horde_core::config::SpawnConstraints;
use horde_core::players::PlayerSnapshot;
use horde_core::types::GroundPlane;

/// A generated spawn position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub position: Vec3,
    /// True if produced by the edge fallback rather than accepted sampling.
    pub fallback: bool,
}

/// Generate `count` spawn positions.
///
/// `occupied` holds existing entity positions; it is only consulted when
/// `constraints.min_entity_spacing` is set.
pub fn generate<R: Rng + ?Sized>(
    count: usize,
    players: &PlayerSnapshot,
    constraints: &SpawnConstraints,
    occupied: &[Vec3],
    rng: &mut R,
) -> Vec<SpawnPoint> {
    let mut taken: Vec<Vec3> = occupied.to_vec();
    let mut points = Vec::with_capacity(count);

    for _ in 0..count {
        let accepted = (0..constraints.max_attempts)
            .map(|_| sample_candidate(players, constraints, rng))
            .find(|candidate| is_valid(*candidate, players, constraints, &taken));

        let point = match accepted {
            Some(position) => SpawnPoint {
                position,
                fallback: false,
            },
            None => {
                let position = edge_fallback(players, constraints, rng);
                tracing::debug!(
                    x = position.x,
                    z = position.z,
                    attempts = constraints.max_attempts,
                    "spawn sampling exhausted, using edge fallback"
                );
                SpawnPoint {
                    position,
                    fallback: true,
                }
            }
        };

        taken.push(point.position);
        points.push(point);
    }

    points
}

/// Whether `candidate` satisfies the placement constraints.
pub fn is_valid(
    candidate: Vec3,
    players: &PlayerSnapshot,
    constraints: &SpawnConstraints,
    occupied: &[Vec3],
) -> bool {
    let half = constraints.world_size * 0.5;
    if candidate.x.abs() > half || candidate.z.abs() > half {
        return false;
    }

    let players_ok = players.positions().all(|player| {
        let distance = candidate.horizontal_distance(player);
        distance >= constraints.min_distance && distance <= constraints.max_distance
    });
    if !players_ok {
        return false;
    }

    match constraints.min_entity_spacing {
        Some(spacing) => occupied
            .iter()
            .all(|other| candidate.horizontal_distance(*other) >= spacing),
        None => true,
    }
}

fn sample_candidate<R: Rng + ?Sized>(
    players: &PlayerSnapshot,
    constraints: &SpawnConstraints,
    rng: &mut R,
) -> Vec3 {
    let reference = if !players.is_empty() && rng.gen_bool(constraints.player_relative_probability)
    {
        players.positions().nth(rng.gen_range(0..players.len()))
    } else {
        None
    };

    match reference {
        Some(player) => {
            let angle = rng.gen_range(0.0..TAU);
            let distance = rng.gen_range(constraints.min_distance..=constraints.max_distance);
            let noise = constraints.noise;
            Vec3::new(
                player.x + angle.sin() * distance + rng.gen_range(-noise..=noise),
                constraints.spawn_height,
                player.z + angle.cos() * distance + rng.gen_range(-noise..=noise),
            )
        }
        None => {
            let half = constraints.world_size * 0.5;
            Vec3::new(
                rng.gen_range(-half..=half),
                constraints.spawn_height,
                rng.gen_range(-half..=half),
            )
        }
    }
}

/// Arena-edge point opposite the first player, or a random edge point.
fn edge_fallback<R: Rng + ?Sized>(
    players: &PlayerSnapshot,
    constraints: &SpawnConstraints,
    rng: &mut R,
) -> Vec3 {
    let distance = constraints.world_size * constraints.edge_fallback_factor;
    let away = players
        .first()
        .map(|(_, position)| -position.horizontal().normalize_or_zero())
        .filter(|direction| *direction != Vec3::ZERO);

    let direction = away.unwrap_or_else(|| {
        let angle = rng.gen_range(0.0..TAU);
        Vec3::new(angle.sin(), 0.0, angle.cos())
    });

    Vec3::new(
        direction.x * distance,
        constraints.spawn_height,
        direction.z * distance,
    )
}
