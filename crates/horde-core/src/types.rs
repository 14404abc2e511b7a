//! Fundamental geometric and simulation types.
//!
//! Positions are `glam::Vec3` in meters. y is up; the ground plane is x/z.
//! Yaw is measured from +z toward +x, so `atan2(dir.x, dir.z)`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Identifier of a simulated (non-player) entity.
pub type EntityId = u32;

/// Identifier of a player, as supplied by the external snapshot provider.
pub type PlayerId = u32;

/// Simulation time tracking. Accumulated from frame deltas, never wall-clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += f64::from(dt);
    }
}

/// Ground-plane helpers for `Vec3`.
pub trait GroundPlane {
    /// Copy with the vertical component zeroed.
    fn horizontal(self) -> Vec3;
    /// Distance on the x/z plane, ignoring altitude.
    fn horizontal_distance(self, other: Vec3) -> f32;
    /// Yaw (radians) facing from `self` toward `other` on the ground plane.
    fn yaw_to(self, other: Vec3) -> f32;
}

impl GroundPlane for Vec3 {
    fn horizontal(self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.z)
    }

    fn horizontal_distance(self, other: Vec3) -> f32 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    fn yaw_to(self, other: Vec3) -> f32 {
        yaw_of(other - self)
    }
}

/// Yaw of a direction vector. Zero vector yields 0.
pub fn yaw_of(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z)
}

/// Wrap an angle into (-PI, PI].
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
