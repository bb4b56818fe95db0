use std::collections::VecDeque;

use super::event::TelemetryEvent;
use super::metrics::TelemetrySnapshot;

/// Most recent events kept for inspection. Totals are not bounded by this.
pub const MAX_EVENTS: usize = 10_000;

/// Keeps a bounded tail of events plus session totals that never roll off.
#[derive(Debug, Default)]
pub struct TelemetryRecorder {
    recent: VecDeque<TelemetryEvent>,
    totals: TelemetrySnapshot,
}

impl TelemetryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: TelemetryEvent) {
        self.totals.observe(&event);
        if self.recent.len() == MAX_EVENTS {
            self.recent.pop_front();
        }
        self.recent.push_back(event);
    }

    pub fn events(&self) -> impl Iterator<Item = &TelemetryEvent> {
        self.recent.iter()
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        self.totals.clone()
    }

    /// Drops the event tail and the totals.
    pub fn clear(&mut self) {
        self.recent.clear();
        self.totals = TelemetrySnapshot::default();
    }

    /// Rolls the totals up into one summary event, called on shutdown.
    pub fn aggregate_session(&self, duration_ticks: u64) -> TelemetryEvent {
        let totals = &self.totals;
        TelemetryEvent::SessionSummary {
            duration_ticks,
            transitions: totals.transitions,
            targets_confirmed: totals.combat.targets_confirmed,
            kills: totals.combat.kills,
            deaths: totals.combat.deaths,
            resets: totals.resets,
        }
    }
}
