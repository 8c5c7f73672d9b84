use serde::{Deserialize, Serialize};

use crate::engine::config;

/// Per-run player progression. Reset wholesale at run start; permanent
/// upgrade levels live in [`crate::state::upgrades::UpgradeLevels`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStats {
    pub hp: f32,
    pub max_hp: f32,
    pub xp: f32,
    pub max_xp: f32,
    pub level: u32,
    pub money: f32,
    pub wave: u32,
}

impl PlayerStats {
    pub fn new_run(max_hp: f32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            xp: 0.0,
            max_xp: config::INITIAL_MAX_XP,
            level: 1,
            money: 0.0,
            wave: 1,
        }
    }

    /// Apply carrier damage, clamping hp to zero. Returns true exactly once:
    /// on the hit that drops hp to zero.
    pub fn apply_damage(&mut self, damage: f32) -> bool {
        if self.hp <= 0.0 {
            return false;
        }
        self.hp = (self.hp - damage).max(0.0);
        self.hp <= 0.0
    }

    pub fn heal(&mut self, amount: f32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    /// Award XP; an overflow rolls into a level-up (one roll per award).
    /// Returns true when a level was gained.
    pub fn award_xp(&mut self, amount: f32) -> bool {
        self.xp += amount;
        if self.xp >= self.max_xp {
            self.xp -= self.max_xp;
            self.max_xp *= config::XP_THRESHOLD_GROWTH;
            self.level += 1;
            true
        } else {
            false
        }
    }
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::new_run(config::INITIAL_MAX_HP)
    }
}
