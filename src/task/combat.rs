use tracing::info;

use super::{AnimatedTask, BotTask, TaskContext};
use crate::kernel::action::{Action, COMBAT_COOLDOWN_TICKS};
use crate::kernel::state::{BotState, MAX_MELEE_EXECUTION_TICKS};
use crate::kernel::target::{find_attacker, find_potential_target, is_valid_target};
use crate::kernel::world::{MotorCommand, Opponent};

/// The confirmed target, if it is still visible and still fair game.
fn engaged_target<'w>(ctx: &TaskContext<'w>) -> Option<&'w Opponent> {
    let world = ctx.world;
    let name = ctx.targets.confirmed()?;
    world
        .opponent(name)
        .filter(|o| is_valid_target(Some(*o), &world.self_name))
}

fn drop_target(ctx: &mut TaskContext<'_>) {
    ctx.targets.clear_confirmed();
    ctx.weapons.reset();
    ctx.state.set_state(BotState::Idle);
}

fn needs_retreat(ctx: &TaskContext<'_>) -> bool {
    let health = ctx.world.health_percent;
    let threshold = ctx.config.min_health_to_eat;
    health < threshold / 2 || (ctx.world.food_count == 0 && health < threshold)
}

pub struct EatTask {
    animated: AnimatedTask,
}

impl EatTask {
    pub fn new() -> Self {
        Self { animated: AnimatedTask::new(Action::EatFood) }
    }
}

impl Default for EatTask {
    fn default() -> Self {
        Self::new()
    }
}

impl BotTask for EatTask {
    fn name(&self) -> &'static str {
        "eat"
    }

    fn should_execute(&self, ctx: &TaskContext<'_>) -> bool {
        ctx.world.health_percent < ctx.config.min_health_to_eat
            && ctx.world.food_count > 0
            && ctx.state.current() != BotState::Eating
            && self.animated.is_action_ready(ctx)
            && !self.animated.is_active(ctx)
    }

    fn do_execute(&mut self, ctx: &mut TaskContext<'_>) -> Option<MotorCommand> {
        info!("Eating at {}% health", ctx.world.health_percent);
        self.animated.record_action(ctx);
        ctx.state.set_state(BotState::Eating);
        Some(MotorCommand::Eat)
    }
}

/// Runs for the safe region when health is critical or food has run out.
pub struct RetreatTask;

impl BotTask for RetreatTask {
    fn name(&self) -> &'static str {
        "retreat"
    }

    fn should_execute(&self, ctx: &TaskContext<'_>) -> bool {
        needs_retreat(ctx) && !ctx.world.in_safe_region
    }

    fn do_execute(&mut self, ctx: &mut TaskContext<'_>) -> Option<MotorCommand> {
        if !ctx.state.is_retreating() {
            info!("Health at {}%, retreating", ctx.world.health_percent);
            ctx.targets.reset();
            ctx.weapons.reset();
            let now = ctx.timers.now();
            ctx.state.set_retreating(true, now);
        }
        Some(MotorCommand::WalkToSafeRegion)
    }
}

/// Leaves the safe region once healed and the post-retreat pause is over.
pub struct ReturnToCombatTask;

impl BotTask for ReturnToCombatTask {
    fn name(&self) -> &'static str {
        "return_to_combat"
    }

    fn should_execute(&self, ctx: &TaskContext<'_>) -> bool {
        ctx.state.current() == BotState::Retreating
            && ctx.world.in_safe_region
            && ctx.world.health_percent >= ctx.config.min_health_to_eat
            && ctx.state.is_combat_cooldown_elapsed(ctx.timers.now())
    }

    fn do_execute(&mut self, ctx: &mut TaskContext<'_>) -> Option<MotorCommand> {
        let now = ctx.timers.now();
        ctx.state.set_retreating(false, now);
        ctx.state.set_state(BotState::Idle);
        Some(MotorCommand::WalkToCombatArea)
    }
}

pub struct ReequipRangedTask;

impl BotTask for ReequipRangedTask {
    fn name(&self) -> &'static str {
        "reequip_ranged"
    }

    fn should_execute(&self, ctx: &TaskContext<'_>) -> bool {
        ctx.state.need_to_equip_ranged()
    }

    fn do_execute(&mut self, ctx: &mut TaskContext<'_>) -> Option<MotorCommand> {
        ctx.state.set_need_to_equip_ranged(false);
        if ctx.world.ranged_equipped {
            return None;
        }
        Some(MotorCommand::EquipRanged)
    }
}

/// Follows a landed ranged hit with one heavy melee swing.
pub struct MeleeSwitchTask {
    animated: AnimatedTask,
}

impl MeleeSwitchTask {
    pub fn new() -> Self {
        Self { animated: AnimatedTask::new(Action::MeleeAttack) }
    }
}

impl Default for MeleeSwitchTask {
    fn default() -> Self {
        Self::new()
    }
}

impl BotTask for MeleeSwitchTask {
    fn name(&self) -> &'static str {
        "melee_switch"
    }

    fn should_execute(&self, ctx: &TaskContext<'_>) -> bool {
        match ctx.state.current() {
            BotState::Ranging => {
                ctx.config.use_special_attack
                    && engaged_target(ctx).is_some()
                    && ctx.weapons.can_use_melee()
                    && !ctx.state.need_to_equip_ranged()
                    && self.animated.is_action_ready(ctx)
            }
            // PreparingMelee always belongs to this task, target or not.
            BotState::PreparingMelee => true,
            _ => false,
        }
    }

    fn do_execute(&mut self, ctx: &mut TaskContext<'_>) -> Option<MotorCommand> {
        if engaged_target(ctx).is_none() {
            info!("Target lost while preparing melee, disengaging");
            drop_target(ctx);
            return None;
        }
        let target = ctx.targets.confirmed()?.to_string();

        if ctx.state.current() == BotState::Ranging {
            ctx.state.set_state(BotState::PreparingMelee);
            if !ctx.world.melee_equipped {
                return Some(MotorCommand::EquipMelee);
            }
        }

        if ctx.world.melee_equipped {
            ctx.weapons.register_melee_attack();
            self.animated.record_action(ctx);
            ctx.state.set_state(BotState::ExecutingMelee);
            Some(MotorCommand::Attack { target })
        } else if ctx.state.state_ticks() >= MAX_MELEE_EXECUTION_TICKS {
            info!("Melee weapon never came up, back to ranging");
            ctx.state.set_state(BotState::Ranging);
            None
        } else {
            Some(MotorCommand::EquipMelee)
        }
    }
}

pub struct RangedAttackTask {
    animated: AnimatedTask,
}

impl RangedAttackTask {
    pub fn new() -> Self {
        Self { animated: AnimatedTask::new(Action::RangedAttack) }
    }
}

impl Default for RangedAttackTask {
    fn default() -> Self {
        Self::new()
    }
}

impl BotTask for RangedAttackTask {
    fn name(&self) -> &'static str {
        "ranged_attack"
    }

    fn should_execute(&self, ctx: &TaskContext<'_>) -> bool {
        ctx.state.current() == BotState::Ranging && ctx.targets.confirmed().is_some()
    }

    fn do_execute(&mut self, ctx: &mut TaskContext<'_>) -> Option<MotorCommand> {
        let world = ctx.world;
        let name = ctx.targets.confirmed()?.to_string();

        match world.opponent(&name) {
            Some(o) if is_valid_target(Some(o), &world.self_name) => {}
            // Out of view but still trading hits: keep the target for now.
            None if ctx.timers.was_opponent_in_combat_within(&name, COMBAT_COOLDOWN_TICKS) => {
                return None;
            }
            _ => {
                info!("Target {} is no longer valid, disengaging", name);
                drop_target(ctx);
                return None;
            }
        }

        if !world.ranged_equipped {
            return Some(MotorCommand::EquipRanged);
        }

        let stalled = self.animated.is_action_ready(ctx)
            && ctx.timers.is_idle_for(self.animated.action.tick_duration());
        if ctx.state.need_to_attack() || stalled {
            self.animated.record_action(ctx);
            ctx.state.set_need_to_attack(false);
            return Some(MotorCommand::Attack { target: name });
        }
        None
    }
}

/// Picks a fight: retaliates on an attacker first, otherwise opens on the
/// first acceptable candidate and waits for our attack animation to confirm it.
pub struct AcquireTargetTask {
    animated: AnimatedTask,
}

impl AcquireTargetTask {
    pub fn new() -> Self {
        Self { animated: AnimatedTask::new(Action::RangedAttack) }
    }
}

impl Default for AcquireTargetTask {
    fn default() -> Self {
        Self::new()
    }
}

impl BotTask for AcquireTargetTask {
    fn name(&self) -> &'static str {
        "acquire_target"
    }

    fn should_execute(&self, ctx: &TaskContext<'_>) -> bool {
        ctx.state.current() == BotState::Idle
            && ctx.targets.confirmed().is_none()
            && !ctx.state.is_retreating()
            && ctx.world.in_combat_area
            && !ctx.world.in_safe_region
    }

    fn do_execute(&mut self, ctx: &mut TaskContext<'_>) -> Option<MotorCommand> {
        let world = ctx.world;
        let config = ctx.config;
        let self_name = world.self_name.as_str();

        if let Some(pending) = ctx.targets.pending().map(str::to_string) {
            if is_valid_target(world.opponent(&pending), self_name) {
                if !self.animated.is_action_ready(ctx) {
                    return None;
                }
                self.animated.record_action(ctx);
                return Some(MotorCommand::Attack { target: pending });
            }
            ctx.targets.clear_pending();
        }

        if let Some(attacker) = find_attacker(&world.opponents, self_name) {
            info!("Retaliating against {}", attacker.name);
            ctx.targets.set_confirmed(&attacker.name);
            ctx.state.set_state(BotState::Ranging);
            self.animated.record_action(ctx);
            return Some(MotorCommand::Attack { target: attacker.name.clone() });
        }

        let candidate = find_potential_target(&world.opponents, self_name, config)?;
        ctx.targets.set_pending(&candidate.name);
        self.animated.record_action(ctx);
        Some(MotorCommand::Attack { target: candidate.name.clone() })
    }
}
