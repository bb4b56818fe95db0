use serde::{Deserialize, Serialize};

use crate::kernel::state::BotState;
use crate::kernel::time::Tick;

// Allowed: identities, ticks, counts, enums.
// Forbidden: raw chat text.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    StateTransition {
        from: BotState,
        to: BotState,
        tick: Tick,
    },

    TargetConfirmed {
        target: String,
        tick: Tick,
    },

    TargetDropped {
        reason: DropReason,
        tick: Tick,
    },

    SessionReset {
        tick: Tick,
    },

    /// A "died" game message: either we or an opponent went down.
    DeathObserved {
        kind: DeathKind,
        tick: Tick,
    },

    RangedHit {
        predicted_damage: i32,
        tick: Tick,
    },

    SessionSummary {
        duration_ticks: u64,
        transitions: u64,
        targets_confirmed: u64,
        kills: u64,
        deaths: u64,
        resets: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropReason {
    FightingSomeoneElse,
    SessionReset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathKind {
    Kill,
    Death,
}
