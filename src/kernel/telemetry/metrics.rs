use serde::Serialize;

use super::event::{DeathKind, DropReason, TelemetryEvent};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TelemetrySnapshot {
    pub transitions: u64,
    pub combat: CombatStats,
    pub resets: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CombatStats {
    pub targets_confirmed: u64,
    pub targets_lost_to_third_party: u64,
    pub kills: u64,
    pub deaths: u64,
    pub ranged_hits: u64,
    pub total_predicted_damage: i64,
    pub avg_predicted_damage: f64,
}

impl TelemetrySnapshot {
    /// Folds one event into the running totals.
    pub fn observe(&mut self, event: &TelemetryEvent) {
        match event {
            TelemetryEvent::StateTransition { .. } => self.transitions += 1,
            TelemetryEvent::TargetConfirmed { .. } => self.combat.targets_confirmed += 1,
            TelemetryEvent::TargetDropped { reason: DropReason::FightingSomeoneElse, .. } => {
                self.combat.targets_lost_to_third_party += 1
            }
            TelemetryEvent::SessionReset { .. } => self.resets += 1,
            TelemetryEvent::DeathObserved { kind, .. } => match kind {
                DeathKind::Kill => self.combat.kills += 1,
                DeathKind::Death => self.combat.deaths += 1,
            },
            TelemetryEvent::RangedHit { predicted_damage, .. } => {
                self.combat.ranged_hits += 1;
                self.combat.total_predicted_damage += i64::from(*predicted_damage);
                self.combat.avg_predicted_damage =
                    self.combat.total_predicted_damage as f64 / self.combat.ranged_hits as f64;
            }
            _ => {}
        }
    }
}
