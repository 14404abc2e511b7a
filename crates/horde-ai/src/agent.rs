//! Per-tick update for one living entity: advance timers, replace the
//! decision when it has run its course, then execute it.

use rand::Rng;

use horde_core::components::{ActiveDecision, Brain, Transform};
use horde_core::config::BehaviorConfig;
use horde_core::decision::Decision;
use horde_core::enums::Mode;
use horde_core::players::PlayerSnapshot;

use crate::decision::{decide, DecisionContext};
use crate::executor::execute;

/// Advance one entity by `dt`. Returns true if a new decision was installed.
pub fn step<R: Rng + ?Sized>(
    transform: &mut Transform,
    brain: &mut Brain,
    active: &mut ActiveDecision,
    players: &PlayerSnapshot,
    config: &BehaviorConfig,
    dt: f32,
    rng: &mut R,
) -> bool {
    if brain.mode == Mode::Dying {
        return false;
    }

    active.elapsed += dt;

    let mut replaced = false;
    if active.elapsed >= active.decision.duration {
        // Credit the finished decision to the attack sequence in one addition.
        if let Some(elapsed) = brain.attack_elapsed.as_mut() {
            *elapsed += active.elapsed;
        }
        let ctx = DecisionContext {
            position: transform.position,
            players,
            config,
        };
        if let Some(decision) = decide(&ctx, brain, rng) {
            *active = ActiveDecision {
                decision,
                elapsed: 0.0,
            };
            replaced = true;
        }
    }

    execute(&active.decision, transform, dt, config);
    replaced
}

/// A decision that is already due, so the first `step` evaluates immediately.
pub fn initial_decision(config: &BehaviorConfig) -> ActiveDecision {
    let decision = Decision::idle(config.idle_duration);
    ActiveDecision {
        decision,
        elapsed: decision.duration,
    }
}
