use tracing::info;

use super::{AnimatedTask, BotTask, TaskContext};
use crate::kernel::action::Action;
use crate::kernel::state::BotState;
use crate::kernel::world::MotorCommand;

/// Errands only start between fights.
fn is_between_fights(ctx: &TaskContext<'_>) -> bool {
    ctx.state.current() == BotState::Idle
        && ctx.targets.confirmed().is_none()
        && !ctx.state.is_retreating()
}

/// Opens a loot key as soon as there is a lull, and stays in Looting until
/// the key is gone.
pub struct LootTask;

impl BotTask for LootTask {
    fn name(&self) -> &'static str {
        "loot"
    }

    fn should_execute(&self, ctx: &TaskContext<'_>) -> bool {
        ctx.state.current() == BotState::Looting || (is_between_fights(ctx) && ctx.world.has_loot_key)
    }

    fn do_execute(&mut self, ctx: &mut TaskContext<'_>) -> Option<MotorCommand> {
        if !ctx.world.has_loot_key {
            info!("Loot claimed");
            ctx.state.set_looting(false);
            return None;
        }
        if ctx.state.current() != BotState::Looting {
            info!("Loot key in inventory, claiming");
            ctx.state.set_looting(true);
        }
        Some(MotorCommand::ClaimLoot)
    }
}

/// Restocks food once it runs low.
pub struct BankTask;

impl BotTask for BankTask {
    fn name(&self) -> &'static str {
        "bank"
    }

    fn should_execute(&self, ctx: &TaskContext<'_>) -> bool {
        ctx.state.current() == BotState::Banking || (is_between_fights(ctx) && ctx.world.is_food_low())
    }

    fn do_execute(&mut self, ctx: &mut TaskContext<'_>) -> Option<MotorCommand> {
        if !ctx.world.is_food_low() {
            info!("Restocked with {} food", ctx.world.food_count);
            ctx.state.set_needs_banking(false);
            return None;
        }
        if ctx.state.current() != BotState::Banking {
            info!("Food low ({}), heading to bank", ctx.world.food_count);
            ctx.state.set_needs_banking(true);
        }
        Some(MotorCommand::Bank)
    }
}

/// Keeps strength boosted while trading ranged hits.
pub struct DrinkBoostTask {
    animated: AnimatedTask,
}

impl DrinkBoostTask {
    pub fn new() -> Self {
        Self { animated: AnimatedTask::new(Action::DrinkBoost) }
    }
}

impl Default for DrinkBoostTask {
    fn default() -> Self {
        Self::new()
    }
}

impl BotTask for DrinkBoostTask {
    fn name(&self) -> &'static str {
        "drink_boost"
    }

    fn should_execute(&self, ctx: &TaskContext<'_>) -> bool {
        ctx.state.current() == BotState::Ranging
            && ctx.targets.confirmed().is_some()
            && !ctx.world.strength_boosted
            && ctx.world.boost_potions > 0
            && self.animated.is_action_ready(ctx)
            && !self.animated.is_active(ctx)
    }

    fn do_execute(&mut self, ctx: &mut TaskContext<'_>) -> Option<MotorCommand> {
        info!("Strength not boosted, drinking");
        self.animated.record_action(ctx);
        Some(MotorCommand::DrinkBoost)
    }
}
