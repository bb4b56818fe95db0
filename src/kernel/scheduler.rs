use tracing::debug;

use super::world::MotorCommand;
use crate::task::combat::{
    AcquireTargetTask, EatTask, MeleeSwitchTask, RangedAttackTask, ReequipRangedTask, RetreatTask,
    ReturnToCombatTask,
};
use crate::task::supply::{BankTask, DrinkBoostTask, LootTask};
use crate::task::{BotTask, TaskContext};

/// Ordered list of candidate tasks. Earlier tasks win.
pub struct Scheduler {
    tasks: Vec<Box<dyn BotTask>>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(vec![
            Box::new(EatTask::new()),
            Box::new(RetreatTask),
            Box::new(ReturnToCombatTask),
            Box::new(LootTask),
            Box::new(BankTask),
            Box::new(ReequipRangedTask),
            Box::new(DrinkBoostTask::new()),
            Box::new(MeleeSwitchTask::new()),
            Box::new(RangedAttackTask::new()),
            Box::new(AcquireTargetTask::new()),
        ])
    }
}

impl Scheduler {
    pub fn new(tasks: Vec<Box<dyn BotTask>>) -> Self {
        Self { tasks }
    }

    pub fn task_names(&self) -> Vec<&'static str> {
        self.tasks.iter().map(|t| t.name()).collect()
    }

    /// Runs tasks in priority order and returns the first motor request.
    /// Tasks that only adjust bookkeeping fall through to the next one.
    pub fn poll(&mut self, ctx: &mut TaskContext<'_>) -> Option<MotorCommand> {
        for task in self.tasks.iter_mut() {
            if let Some(command) = task.execute(ctx) {
                debug!(task = task.name(), ?command, "Task emitted command");
                return Some(command);
            }
        }
        None
    }
}
