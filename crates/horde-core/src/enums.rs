//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Behavioral mode of a simulated entity.
///
/// `Dying` is terminal: once entered, no decision is ever evaluated again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Idle,
    Pursuing,
    Attacking,
    Wandering,
    Dying,
}

/// Discriminant of a `Decision` action, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Idle,
    Wander,
    Chase,
    Attack,
    Rotate,
    Scream,
}

/// Animation hint for the external animation collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationHint {
    #[default]
    Idle,
    Walk,
    Run,
    Attack,
    Scream,
    Death,
}

impl AnimationHint {
    /// Derive the hint from an entity's mode and current action.
    pub fn from_state(mode: Mode, action: ActionKind) -> Self {
        if mode == Mode::Dying {
            return AnimationHint::Death;
        }
        match action {
            ActionKind::Idle | ActionKind::Rotate => AnimationHint::Idle,
            ActionKind::Wander => AnimationHint::Walk,
            ActionKind::Chase => AnimationHint::Run,
            ActionKind::Attack => AnimationHint::Attack,
            ActionKind::Scream => AnimationHint::Scream,
        }
    }
}
