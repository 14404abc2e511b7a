//! Timed behavior decisions.
//!
//! A `Decision` is an action plus how long it stays active and how fast the
//! entity moves while executing it. The action carries its own target payload
//! so the executor can match exhaustively.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::ActionKind;

/// What the entity does while a decision is active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    /// Stand still.
    Idle,
    /// Walk toward a random point.
    Wander { target: Vec3 },
    /// Run toward a player's ground-leveled position.
    Chase { target: Vec3 },
    /// Strike in place, facing the target.
    Attack { target: Vec3 },
    /// Turn toward the target yaw before striking.
    Rotate { yaw: f32 },
    /// Turn toward the target yaw while screaming.
    Scream { yaw: f32 },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Idle => ActionKind::Idle,
            Action::Wander { .. } => ActionKind::Wander,
            Action::Chase { .. } => ActionKind::Chase,
            Action::Attack { .. } => ActionKind::Attack,
            Action::Rotate { .. } => ActionKind::Rotate,
            Action::Scream { .. } => ActionKind::Scream,
        }
    }

    /// Target position, for actions that have one.
    pub fn target_position(&self) -> Option<Vec3> {
        match *self {
            Action::Wander { target } | Action::Chase { target } | Action::Attack { target } => {
                Some(target)
            }
            Action::Idle | Action::Rotate { .. } | Action::Scream { .. } => None,
        }
    }

    /// Target yaw, for turning actions.
    pub fn target_rotation(&self) -> Option<f32> {
        match *self {
            Action::Rotate { yaw } | Action::Scream { yaw } => Some(yaw),
            _ => None,
        }
    }
}

/// A timed action. Durations are in seconds, speeds in m/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub duration: f32,
    pub speed: f32,
}

impl Decision {
    pub fn idle(duration: f32) -> Self {
        Self {
            action: Action::Idle,
            duration,
            speed: 0.0,
        }
    }

    pub fn wander(target: Vec3, duration: f32, speed: f32) -> Self {
        Self {
            action: Action::Wander { target },
            duration,
            speed,
        }
    }

    pub fn chase(target: Vec3, duration: f32, speed: f32) -> Self {
        Self {
            action: Action::Chase { target },
            duration,
            speed,
        }
    }

    pub fn attack(target: Vec3, duration: f32) -> Self {
        Self {
            action: Action::Attack { target },
            duration,
            speed: 0.0,
        }
    }

    pub fn rotate(yaw: f32, duration: f32) -> Self {
        Self {
            action: Action::Rotate { yaw },
            duration,
            speed: 0.0,
        }
    }

    pub fn scream(yaw: f32, duration: f32) -> Self {
        Self {
            action: Action::Scream { yaw },
            duration,
            speed: 0.0,
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.action.kind()
    }
}
