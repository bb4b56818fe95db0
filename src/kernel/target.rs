use tracing::{debug, info};

use super::action::is_attack_animation;
use super::event::Skill;
use super::world::Opponent;
use crate::config::Config;

/// Ranged experience awarded per point of damage dealt.
pub const XP_PER_DAMAGE: i32 = 4;

/// Pure estimate of damage dealt from a ranged experience gain.
pub fn predict_damage(xp_delta: i32) -> i32 {
    xp_delta / XP_PER_DAMAGE
}

/// Who we are fighting, who we are about to fight, and how hard we last hit them.
#[derive(Debug, Clone, Default)]
pub struct TargetTracker {
    pending: Option<String>,
    confirmed: Option<String>,
    last_xp_delta: i32,
    prediction_valid: bool,
}

impl TargetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn confirmed(&self) -> Option<&str> {
        self.confirmed.as_deref()
    }

    /// Replaces any previous candidate.
    pub fn set_pending(&mut self, identity: &str) {
        info!("Setting pending target: {}", identity);
        self.pending = Some(identity.to_string());
    }

    pub fn set_confirmed(&mut self, identity: &str) {
        info!("Setting target: {}", identity);
        self.confirmed = Some(identity.to_string());
    }

    pub fn confirm_pending(&mut self) {
        if let Some(identity) = self.pending.take() {
            info!("Confirming pending target: {}", identity);
            self.confirmed = Some(identity);
        }
    }

    pub fn clear_pending(&mut self) {
        if let Some(identity) = self.pending.take() {
            info!("Clearing pending target: {}", identity);
        }
    }

    pub fn clear_confirmed(&mut self) {
        if let Some(identity) = self.confirmed.take() {
            info!("Target cleared: {}", identity);
        }
        self.reset_damage_prediction();
    }

    pub fn on_skill_experience_change(&mut self, skill: Skill, delta: i32) {
        if skill != Skill::Ranged {
            return;
        }
        self.last_xp_delta = delta;
        self.prediction_valid = delta > 0;
        debug!(delta, valid = self.prediction_valid, "Ranged experience change");
    }

    pub fn last_xp_delta(&self) -> i32 {
        self.last_xp_delta
    }

    pub fn is_prediction_valid(&self) -> bool {
        self.prediction_valid
    }

    /// Damage estimate for the last landed hit, if it can be attributed to the target.
    pub fn predicted_damage(&self) -> Option<i32> {
        self.prediction_valid.then(|| predict_damage(self.last_xp_delta))
    }

    pub fn reset_damage_prediction(&mut self) {
        self.last_xp_delta = 0;
        self.prediction_valid = false;
    }

    pub fn reset(&mut self) {
        self.pending = None;
        self.confirmed = None;
        self.reset_damage_prediction();
    }
}

/// An opponent is still fair game if it stands outside the safe region and
/// is not committed to a third party.
pub fn is_valid_target(opponent: Option<&Opponent>, self_identity: &str) -> bool {
    match opponent {
        Some(o) => {
            !o.in_safe_region
                && o.target.as_deref().map_or(true, |t| t == self_identity)
        }
        None => false,
    }
}

/// First opponent worth engaging: in level range, unengaged, outside the
/// safe region and not in heavy armour.
pub fn find_potential_target<'a>(
    opponents: &'a [Opponent],
    self_identity: &str,
    config: &Config,
) -> Option<&'a Opponent> {
    opponents.iter().find(|o| {
        o.name != self_identity
            && config.accepts_combat_level(o.combat_level)
            && o.target.is_none()
            && !o.targeted_by_others
            && !o.in_safe_region
            && !o.wearing_heavy_armour
    })
}

/// Someone already swinging at us from outside the safe region.
pub fn find_attacker<'a>(opponents: &'a [Opponent], self_identity: &str) -> Option<&'a Opponent> {
    opponents.iter().find(|o| {
        o.target.as_deref() == Some(self_identity)
            && is_attack_animation(o.animation)
            && !o.in_safe_region
    })
}
