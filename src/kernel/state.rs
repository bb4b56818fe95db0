use serde::{Deserialize, Serialize};
use tracing::info;

use super::time::{seconds_to_ticks, Tick};

/// Ticks spent in Eating before resuming.
pub const EATING_ANIMATION_DURATION: u32 = 3;
/// Longest a melee combo may run before falling back to the bow.
pub const MAX_MELEE_EXECUTION_TICKS: u32 = 5;
/// Real-time pause after a retreat before re-engaging.
pub const COMBAT_COOLDOWN_SECONDS: u64 = 10;

const DISCONNECT_PHRASES: [&str; 2] = ["you have been disconnected", "your session has expired"];

/// Mutually exclusive behaviours of the agent. Idle on boot and after a reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BotState {
    #[default]
    Idle,
    Ranging,
    PositioningForMelee,
    PreparingMelee,
    ExecutingMelee,
    Eating,
    Retreating,
    Looting,
    Banking,
    RestoringResource,
}

impl BotState {
    pub fn is_melee(&self) -> bool {
        matches!(self, BotState::PreparingMelee | BotState::ExecutingMelee)
    }
}

/// Where to go when eating finishes, and which follow-ups that implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resume {
    pub state: BotState,
    pub equip_ranged: bool,
    pub attack: bool,
}

impl Resume {
    const fn to(state: BotState) -> Self {
        Self { state, equip_ranged: false, attack: false }
    }
}

/// Resume precedence: executing melee, retreating, looting, has target, idle.
pub fn resume_after_eating(saved: BotState, has_target: bool) -> Resume {
    match saved {
        BotState::ExecutingMelee => Resume { state: BotState::Ranging, equip_ranged: true, attack: true },
        BotState::Retreating => Resume::to(BotState::Retreating),
        BotState::Looting => Resume::to(BotState::Looting),
        _ if has_target => Resume { state: BotState::Ranging, equip_ranged: false, attack: true },
        _ => Resume::to(BotState::Idle),
    }
}

#[derive(Debug, Clone)]
pub struct StateMachine {
    current: BotState,
    /// Captured on every entry into Eating.
    resume: BotState,
    last_animation: i32,
    state_ticks: u32,

    need_to_attack: bool,
    need_to_equip_ranged: bool,
    retreating: bool,
    looting: bool,
    needs_banking: bool,
    restoring_resource: bool,
    retreat_started: Option<Tick>,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self {
            current: BotState::Idle,
            resume: BotState::Idle,
            last_animation: super::action::NO_ANIMATION,
            state_ticks: 0,
            need_to_attack: false,
            need_to_equip_ranged: false,
            retreating: false,
            looting: false,
            needs_banking: false,
            restoring_resource: false,
            retreat_started: None,
        }
    }
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the sub-state counter and applies the time-boxed exits.
    /// `has_target` is whether a confirmed target exists right now.
    pub fn tick(&mut self, has_target: bool) {
        self.state_ticks += 1;

        match self.current {
            BotState::Eating if self.state_ticks >= EATING_ANIMATION_DURATION => {
                let resume = resume_after_eating(self.resume, has_target);
                info!("Eating finished, resuming {:?} (saved {:?})", resume.state, self.resume);
                self.need_to_equip_ranged |= resume.equip_ranged;
                self.need_to_attack |= resume.attack;
                self.enter(resume.state);
            }
            BotState::ExecutingMelee if self.state_ticks >= MAX_MELEE_EXECUTION_TICKS => {
                info!("Melee execution timed out, returning to Ranging");
                self.need_to_equip_ranged = true;
                self.need_to_attack = true;
                self.enter(BotState::Ranging);
            }
            _ => {}
        }
    }

    fn enter(&mut self, state: BotState) {
        self.current = state;
        self.state_ticks = 0;
    }

    /// Requests a transition. Re-entering the current state is ignored.
    pub fn set_state(&mut self, state: BotState) {
        if self.current == state {
            return;
        }
        info!("Changing from {:?} to {:?}", self.current, state);

        if state == BotState::Eating {
            self.resume = self.current;
        } else if state == BotState::Ranging && self.current.is_melee() {
            self.need_to_equip_ranged = true;
            self.need_to_attack = true;
        }
        self.enter(state);
    }

    pub fn animate(&mut self, animation: i32) {
        if animation != super::action::NO_ANIMATION {
            self.last_animation = animation;
        }
    }

    /// Expects lowercased text. Returns true if the message forced a reset.
    pub fn observe_message(&mut self, text: &str) -> bool {
        if DISCONNECT_PHRASES.iter().any(|p| text.contains(p)) {
            info!("Session lost, resetting state");
            self.reset();
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        let last_animation = self.last_animation;
        *self = Self::default();
        self.last_animation = last_animation;
    }

    pub fn current(&self) -> BotState {
        self.current
    }

    pub fn resume_state(&self) -> BotState {
        self.resume
    }

    pub fn state_ticks(&self) -> u32 {
        self.state_ticks
    }

    pub fn last_animation(&self) -> i32 {
        self.last_animation
    }

    pub fn need_to_attack(&self) -> bool {
        self.need_to_attack
    }

    pub fn set_need_to_attack(&mut self, value: bool) {
        self.need_to_attack = value;
    }

    pub fn need_to_equip_ranged(&self) -> bool {
        self.need_to_equip_ranged
    }

    pub fn set_need_to_equip_ranged(&mut self, value: bool) {
        self.need_to_equip_ranged = value;
    }

    pub fn is_retreating(&self) -> bool {
        self.retreating
    }

    pub fn set_retreating(&mut self, retreating: bool, at: Tick) {
        self.retreating = retreating;
        if retreating {
            info!("Started retreating at tick {}", at.frame);
            self.retreat_started = Some(at);
            self.set_state(BotState::Retreating);
        } else {
            info!("Stopped retreating");
            self.retreat_started = None;
        }
    }

    pub fn retreat_started(&self) -> Option<Tick> {
        self.retreat_started
    }

    pub fn is_looting(&self) -> bool {
        self.looting
    }

    pub fn set_looting(&mut self, looting: bool) {
        self.looting = looting;
        self.set_state(if looting { BotState::Looting } else { BotState::Idle });
    }

    pub fn needs_banking(&self) -> bool {
        self.needs_banking
    }

    /// A retreat always wins over a bank trip.
    pub fn set_needs_banking(&mut self, needs_banking: bool) {
        self.needs_banking = needs_banking;
        if self.current == BotState::Retreating {
            return;
        }
        self.set_state(if needs_banking { BotState::Banking } else { BotState::Idle });
    }

    pub fn is_restoring_resource(&self) -> bool {
        self.restoring_resource
    }

    pub fn set_restoring_resource(&mut self, restoring: bool) {
        self.restoring_resource = restoring;
        self.set_state(if restoring { BotState::RestoringResource } else { BotState::Idle });
    }

    /// True once a retreat is on record and the post-retreat pause has passed.
    pub fn is_combat_cooldown_elapsed(&self, now: Tick) -> bool {
        self.retreat_started
            .is_some_and(|start| now.since(start) >= seconds_to_ticks(COMBAT_COOLDOWN_SECONDS))
    }
}
