use serde::{Deserialize, Serialize};

use super::timers::TimerLedger;

/// Animation id reported when the avatar is doing nothing.
pub const NO_ANIMATION: i32 = -1;

pub const RANGED_ATTACK_ANIMATION: i32 = 426;
pub const MELEE_ATTACK_ANIMATION: i32 = 407;
pub const EAT_ANIMATION: i32 = 829;
// Potions share the eating animation.
pub const DRINK_ANIMATION: i32 = 829;
pub const CLUB_ATTACK_ANIMATION: i32 = 2661;
pub const BATTLEAXE_ATTACK_ANIMATION: i32 = 395;
pub const WARHAMMER_ATTACK_ANIMATION: i32 = 401;
pub const COMBAT_SPELL_ANIMATION: i32 = 711;
pub const SCIMITAR_ATTACK_ANIMATION: i32 = 390;

/// Animations that mean someone is swinging, shooting or casting at an opponent.
pub const ATTACK_ANIMATIONS: [i32; 7] = [
    RANGED_ATTACK_ANIMATION,
    MELEE_ATTACK_ANIMATION,
    CLUB_ATTACK_ANIMATION,
    BATTLEAXE_ATTACK_ANIMATION,
    WARHAMMER_ATTACK_ANIMATION,
    COMBAT_SPELL_ANIMATION,
    SCIMITAR_ATTACK_ANIMATION,
];

pub const RANGED_SPEED: u64 = 3;
pub const MELEE_SPEED: u64 = 7;
pub const EAT_SPEED: u64 = 3;
pub const DRINK_SPEED: u64 = 3;

/// How long an opponent counts as "recently fighting" after their last splat.
pub const COMBAT_COOLDOWN_TICKS: u64 = 15;

pub fn is_attack_animation(animation: i32) -> bool {
    ATTACK_ANIMATIONS.contains(&animation)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    RangedAttack,
    MeleeAttack,
    EatFood,
    DrinkBoost,
}

impl Action {
    /// Animation the game reports while this action is being performed.
    pub const fn animation(&self) -> i32 {
        match self {
            Action::RangedAttack => RANGED_ATTACK_ANIMATION,
            Action::MeleeAttack => MELEE_ATTACK_ANIMATION,
            Action::EatFood => EAT_ANIMATION,
            Action::DrinkBoost => DRINK_ANIMATION,
        }
    }

    /// Cooldown in ticks before the action may be repeated.
    pub const fn tick_duration(&self) -> u64 {
        match self {
            Action::RangedAttack => RANGED_SPEED,
            Action::MeleeAttack => MELEE_SPEED,
            Action::EatFood => EAT_SPEED,
            Action::DrinkBoost => DRINK_SPEED,
        }
    }

    /// True while the avatar is still inside this action's animation window.
    pub fn is_active(&self, last_animation: i32, ledger: &TimerLedger) -> bool {
        last_animation == self.animation() && !ledger.is_idle_for(self.tick_duration())
    }
}
