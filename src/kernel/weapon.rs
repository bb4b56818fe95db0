use tracing::debug;

use super::time::Tick;

/// Decides when the heavy melee weapon may be swung.
///
/// A melee swing stays spent until the next ranged hit lands. Ranged
/// attempts that never connect do not re-open it.
#[derive(Debug, Clone, Default)]
pub struct WeaponArbiter {
    melee_used_since_ranged_hit: bool,
    ranged_hit_registered: bool,
    ranged_attack_registered: bool,
    last_ranged_hit: Tick,
    last_ranged_attack: Tick,
}

impl WeaponArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_melee_attack(&mut self) {
        debug!("Melee attack registered");
        self.melee_used_since_ranged_hit = true;
        self.ranged_hit_registered = false;
    }

    pub fn register_ranged_hit(&mut self, tick: Tick) {
        debug!(tick = tick.frame, "Ranged hit registered");
        self.last_ranged_hit = tick;
        self.ranged_hit_registered = true;
        self.melee_used_since_ranged_hit = false;
    }

    pub fn register_ranged_attack(&mut self, tick: Tick) {
        debug!(tick = tick.frame, "Ranged attack animation registered");
        self.last_ranged_attack = tick;
        self.ranged_attack_registered = true;
    }

    pub fn can_use_melee(&self) -> bool {
        !self.melee_used_since_ranged_hit && self.ranged_attack_registered
    }

    pub fn melee_used_since_ranged_hit(&self) -> bool {
        self.melee_used_since_ranged_hit
    }

    pub fn ranged_hit_registered(&self) -> bool {
        self.ranged_hit_registered
    }

    pub fn ranged_attack_registered(&self) -> bool {
        self.ranged_attack_registered
    }

    pub fn last_ranged_hit(&self) -> Tick {
        self.last_ranged_hit
    }

    pub fn last_ranged_attack(&self) -> Tick {
        self.last_ranged_attack
    }

    pub fn reset(&mut self) {
        debug!("Weapon tracking reset");
        *self = Self::default();
    }
}
