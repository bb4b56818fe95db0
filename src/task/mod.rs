//! Task layer: each task looks at the core's state and decides on its own
//! whether it should act this tick.

pub mod combat;
pub mod supply;

use crate::config::Config;
use crate::kernel::action::Action;
use crate::kernel::state::StateMachine;
use crate::kernel::target::TargetTracker;
use crate::kernel::timers::TimerLedger;
use crate::kernel::weapon::WeaponArbiter;
use crate::kernel::world::{MotorCommand, WorldSnapshot};

/// Borrowed view of one session handed to tasks for a single poll.
pub struct TaskContext<'a> {
    pub config: &'a Config,
    pub timers: &'a mut TimerLedger,
    pub state: &'a mut StateMachine,
    pub targets: &'a mut TargetTracker,
    pub weapons: &'a mut WeaponArbiter,
    pub world: &'a WorldSnapshot,
}

pub trait BotTask: Send {
    fn name(&self) -> &'static str;

    /// Pure eligibility check against the current state.
    fn should_execute(&self, ctx: &TaskContext<'_>) -> bool;

    /// Performs the task. `None` means nothing for the motor layer to do.
    fn do_execute(&mut self, ctx: &mut TaskContext<'_>) -> Option<MotorCommand>;

    fn execute(&mut self, ctx: &mut TaskContext<'_>) -> Option<MotorCommand> {
        if self.should_execute(ctx) {
            self.do_execute(ctx)
        } else {
            None
        }
    }
}

/// Cooldown bookkeeping for tasks bound to one [`Action`].
#[derive(Debug, Clone, Copy)]
pub struct AnimatedTask {
    pub action: Action,
}

impl AnimatedTask {
    pub const fn new(action: Action) -> Self {
        Self { action }
    }

    pub fn is_action_ready(&self, ctx: &TaskContext<'_>) -> bool {
        ctx.timers.is_action_ready(self.action)
    }

    pub fn record_action(&self, ctx: &mut TaskContext<'_>) {
        ctx.timers.record_action(self.action);
    }

    pub fn is_active(&self, ctx: &TaskContext<'_>) -> bool {
        self.action.is_active(ctx.state.last_animation(), &*ctx.timers)
    }
}
