use tracing::{debug, info};

use super::action::{is_attack_animation, Action};
use super::event::{ChatMessage, Event, Skill};
use super::scheduler::Scheduler;
use super::state::{BotState, StateMachine};
use super::target::{predict_damage, TargetTracker};
use super::telemetry::event::{DeathKind, DropReason, TelemetryEvent};
use super::telemetry::recorder::TelemetryRecorder;
use super::time::Tick;
use super::timers::TimerLedger;
use super::weapon::WeaponArbiter;
use super::world::{MotorCommand, WorldSnapshot};
use crate::config::Config;
use crate::task::TaskContext;

const FIGHTING_ELSEWHERE: &str = "is fighting another player";
const DIED: &str = "died";
const SELF_DIED: [&str; 2] = ["you died", "you have died"];

/// Single entry point for every inbound game event.
///
/// Each handler touches the components in a fixed order so that signals
/// arriving within one tick cannot race each other. Nothing here blocks.
pub struct Reactor {
    pub config: Config,
    pub timers: TimerLedger,
    pub state: StateMachine,
    pub targets: TargetTracker,
    pub weapons: WeaponArbiter,
    pub telemetry: TelemetryRecorder,
}

impl Reactor {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            timers: TimerLedger::new(),
            state: StateMachine::new(),
            targets: TargetTracker::new(),
            weapons: WeaponArbiter::new(),
            telemetry: TelemetryRecorder::new(),
        }
    }

    pub fn now(&self) -> Tick {
        self.timers.now()
    }

    pub fn dispatch(&mut self, event: Event) {
        match event {
            Event::Tick => self.on_tick(),
            Event::Animation(id) => self.on_animation(id),
            Event::Chat(message) => self.on_chat(&message),
            Event::SkillExperience { skill, delta } => self.on_skill_experience(skill, delta),
            Event::DamageSplat { source } => self.on_damage_splat(&source),
        }
    }

    /// Applies a batch of events in delivery order, then lets the tasks pick
    /// at most one effect.
    pub fn tick_step(
        &mut self,
        events: Vec<Event>,
        scheduler: &mut Scheduler,
        world: &WorldSnapshot,
    ) -> Option<MotorCommand> {
        for event in events {
            self.dispatch(event);
        }
        self.poll_tasks(scheduler, world)
    }

    pub fn poll_tasks(&mut self, scheduler: &mut Scheduler, world: &WorldSnapshot) -> Option<MotorCommand> {
        let before = self.state.current();
        let command = {
            let mut ctx = self.task_context(world);
            scheduler.poll(&mut ctx)
        };
        self.note_transition(before);
        command
    }

    pub fn task_context<'a>(&'a mut self, world: &'a WorldSnapshot) -> TaskContext<'a> {
        TaskContext {
            config: &self.config,
            timers: &mut self.timers,
            state: &mut self.state,
            targets: &mut self.targets,
            weapons: &mut self.weapons,
            world,
        }
    }

    /// Ledger first so that sub-state timeouts see the fresh tick.
    pub fn on_tick(&mut self) {
        let before = self.state.current();
        self.timers.advance_tick();
        self.state.tick(self.targets.confirmed().is_some());
        self.note_transition(before);
    }

    /// Only call for the agent's own avatar.
    pub fn on_animation(&mut self, animation: i32) {
        let before = self.state.current();
        self.timers.record_animation_tick();
        self.state.animate(animation);

        if animation == Action::RangedAttack.animation() {
            debug!("Ranged attack animation detected");
            self.weapons.register_ranged_attack(self.timers.now());
        }

        if is_attack_animation(animation) {
            if let Some(pending) = self.targets.pending().map(str::to_string) {
                info!("Attack animation detected, confirming target: {}", pending);
                self.targets.confirm_pending();
                self.telemetry.record(TelemetryEvent::TargetConfirmed {
                    target: pending,
                    tick: self.timers.now(),
                });
                self.state.set_state(BotState::Ranging);
            }
        }
        self.note_transition(before);
    }

    pub fn on_chat(&mut self, message: &ChatMessage) {
        if !message.category.is_server() {
            return;
        }
        let before = self.state.current();
        let text = message.text.to_lowercase();
        self.timers.observe_message(&text);

        if self.state.observe_message(&text) {
            self.reset_session();
        } else if text.contains(FIGHTING_ELSEWHERE) {
            self.handle_target_engaged_elsewhere();
        } else if text.contains(DIED) {
            let kind = if SELF_DIED.iter().any(|p| text.contains(p)) {
                DeathKind::Death
            } else {
                DeathKind::Kill
            };
            info!("Death message observed: {:?}", kind);
            self.telemetry.record(TelemetryEvent::DeathObserved { kind, tick: self.timers.now() });
        }
        self.note_transition(before);
    }

    fn handle_target_engaged_elsewhere(&mut self) {
        if self.targets.pending().is_some() {
            info!("Target is fighting another player, clearing pending target");
            self.targets.clear_pending();
        } else if self.targets.confirmed().is_some() {
            info!("Target is fighting another player, clearing target");
            self.targets.clear_confirmed();
            self.weapons.reset();
            self.state.set_state(BotState::Idle);
        } else {
            return;
        }
        self.telemetry.record(TelemetryEvent::TargetDropped {
            reason: DropReason::FightingSomeoneElse,
            tick: self.timers.now(),
        });
    }

    /// Tick counter and cooldown ledger survive; everything transient goes.
    fn reset_session(&mut self) {
        let had_target = self.targets.pending().is_some() || self.targets.confirmed().is_some();
        self.targets.reset();
        self.weapons.reset();
        let now = self.timers.now();
        if had_target {
            self.telemetry.record(TelemetryEvent::TargetDropped { reason: DropReason::SessionReset, tick: now });
        }
        self.telemetry.record(TelemetryEvent::SessionReset { tick: now });
    }

    pub fn on_skill_experience(&mut self, skill: Skill, delta: i32) {
        if skill != Skill::Ranged {
            return;
        }
        self.targets.on_skill_experience_change(skill, delta);

        if delta > 0 && self.targets.confirmed().is_some() {
            let now = self.timers.now();
            self.weapons.register_ranged_hit(now);
            self.telemetry.record(TelemetryEvent::RangedHit {
                predicted_damage: predict_damage(delta),
                tick: now,
            });
        }
    }

    pub fn on_damage_splat(&mut self, source: &str) {
        if self.targets.confirmed() == Some(source) {
            debug!("Target {} took damage, recording combat", source);
            self.timers.record_opponent_combat(source);
        }
    }

    fn note_transition(&mut self, before: BotState) {
        let after = self.state.current();
        if before != after {
            self.telemetry.record(TelemetryEvent::StateTransition {
                from: before,
                to: after,
                tick: self.timers.now(),
            });
        }
    }
}
