use std::collections::HashMap;

use tracing::debug;

use super::action::Action;
use super::time::Tick;

/// Chat fragments that report healing. Healing interrupts the combat
/// animation without emitting a new one.
const HEALING_PHRASES: [&str; 4] = ["you eat", "health points", "heals", "restore"];

/// Tick clock plus every "when did X last happen" record the core relies on.
///
/// Entries are only ever overwritten. Staleness is decided by comparing
/// against the current tick, so an unknown key is always the permissive case.
#[derive(Debug, Clone, Default)]
pub struct TimerLedger {
    now: Tick,
    last_animation: Tick,
    actions: HashMap<Action, Tick>,
    opponent_combat: HashMap<String, Tick>,
}

impl TimerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_tick(&mut self) {
        self.now = self.now.next();
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn last_animation_tick(&self) -> Tick {
        self.last_animation
    }

    pub fn record_animation_tick(&mut self) {
        self.last_animation = self.now;
    }

    pub fn is_idle_for(&self, threshold_ticks: u64) -> bool {
        self.now.since(self.last_animation) >= threshold_ticks
    }

    pub fn record_action(&mut self, action: Action) {
        self.actions.insert(action, self.now);
    }

    pub fn is_action_ready(&self, action: Action) -> bool {
        match self.actions.get(&action) {
            Some(at) => self.now.since(*at) >= action.tick_duration(),
            None => true,
        }
    }

    pub fn record_opponent_combat(&mut self, identity: &str) {
        self.opponent_combat.insert(identity.to_string(), self.now);
    }

    pub fn was_opponent_in_combat_within(&self, identity: &str, ticks: u64) -> bool {
        self.opponent_combat
            .get(identity)
            .is_some_and(|at| self.now.since(*at) < ticks)
    }

    pub fn last_opponent_combat(&self, identity: &str) -> Option<Tick> {
        self.opponent_combat.get(identity).copied()
    }

    /// Expects lowercased text.
    pub fn observe_message(&mut self, text: &str) {
        if HEALING_PHRASES.iter().any(|p| text.contains(p)) {
            debug!("Healing message, clearing animation stamp");
            self.last_animation = Tick::new();
        }
    }
}
