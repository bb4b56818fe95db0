//! Read-only view of the game world, filled in by the query layer each tick,
//! and the motor requests the core hands back.

use serde::{Deserialize, Serialize};

/// At or below this many food items the agent goes to restock.
pub const MIN_FOOD_COUNT: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opponent {
    pub name: String,
    pub combat_level: i32,
    pub in_safe_region: bool,
    /// Whoever this opponent is currently interacting with.
    pub target: Option<String>,
    pub targeted_by_others: bool,
    pub wearing_heavy_armour: bool,
    pub animation: i32,
}

impl Opponent {
    pub fn new(name: &str, combat_level: i32) -> Self {
        Self {
            name: name.to_string(),
            combat_level,
            in_safe_region: false,
            target: None,
            targeted_by_others: false,
            wearing_heavy_armour: false,
            animation: super::action::NO_ANIMATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub self_name: String,
    /// Current hitpoints as a percentage of maximum, 0..=100.
    pub health_percent: i32,
    pub in_combat_area: bool,
    pub in_safe_region: bool,
    pub ranged_equipped: bool,
    pub melee_equipped: bool,
    pub food_count: u32,
    #[serde(default)]
    pub boost_potions: u32,
    /// Current strength is above the base level.
    #[serde(default)]
    pub strength_boosted: bool,
    #[serde(default)]
    pub has_loot_key: bool,
    pub opponents: Vec<Opponent>,
}

impl WorldSnapshot {
    pub fn new(self_name: &str) -> Self {
        Self {
            self_name: self_name.to_string(),
            health_percent: 100,
            in_combat_area: true,
            in_safe_region: false,
            ranged_equipped: true,
            melee_equipped: false,
            food_count: 0,
            boost_potions: 0,
            strength_boosted: false,
            has_loot_key: false,
            opponents: Vec::new(),
        }
    }

    pub fn is_food_low(&self) -> bool {
        self.food_count <= MIN_FOOD_COUNT
    }

    pub fn opponent(&self, name: &str) -> Option<&Opponent> {
        self.opponents.iter().find(|o| o.name == name)
    }
}

/// Effects the motor layer is asked to carry out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotorCommand {
    EquipRanged,
    EquipMelee,
    Attack { target: String },
    Eat,
    DrinkBoost,
    ClaimLoot,
    Bank,
    WalkToSafeRegion,
    WalkToCombatArea,
}
