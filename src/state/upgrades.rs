use serde::{Deserialize, Serialize};

/// Fractional bonus per upgrade level (+10%).
pub const UPGRADE_STEP: f32 = 0.10;

/// Permanent meta-progression axes. Bought in the shop between runs (out of
/// scope here); the simulation only reads the resulting levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    MaxHp,
    MoneyGain,
    ProjectileSpeed,
    XpGain,
    Damage,
    Accuracy,
}

impl UpgradeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeKind::MaxHp => "upg_hp",
            UpgradeKind::MoneyGain => "upg_money",
            UpgradeKind::ProjectileSpeed => "upg_speed",
            UpgradeKind::XpGain => "upg_xp",
            UpgradeKind::Damage => "upg_dmg",
            UpgradeKind::Accuracy => "upg_acc",
        }
    }
}

/// Upgrade levels carried across runs. Each level contributes a
/// multiplicative +10% on its axis.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UpgradeLevels {
    pub max_hp: u32,
    pub money_gain: u32,
    pub projectile_speed: u32,
    pub xp_gain: u32,
    pub damage: u32,
    pub accuracy: u32,
}

impl UpgradeLevels {
    pub fn level(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::MaxHp => self.max_hp,
            UpgradeKind::MoneyGain => self.money_gain,
            UpgradeKind::ProjectileSpeed => self.projectile_speed,
            UpgradeKind::XpGain => self.xp_gain,
            UpgradeKind::Damage => self.damage,
            UpgradeKind::Accuracy => self.accuracy,
        }
    }

    pub fn set_level(&mut self, kind: UpgradeKind, level: u32) {
        match kind {
            UpgradeKind::MaxHp => self.max_hp = level,
            UpgradeKind::MoneyGain => self.money_gain = level,
            UpgradeKind::ProjectileSpeed => self.projectile_speed = level,
            UpgradeKind::XpGain => self.xp_gain = level,
            UpgradeKind::Damage => self.damage = level,
            UpgradeKind::Accuracy => self.accuracy = level,
        }
    }

    pub fn multiplier(&self, kind: UpgradeKind) -> f32 {
        1.0 + self.level(kind) as f32 * UPGRADE_STEP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_multipliers_are_one() {
        let upgrades = UpgradeLevels::default();
        assert_eq!(upgrades.multiplier(UpgradeKind::Damage), 1.0);
        assert_eq!(upgrades.multiplier(UpgradeKind::Accuracy), 1.0);
    }

    #[test]
    fn each_level_adds_ten_percent() {
        let mut upgrades = UpgradeLevels::default();
        upgrades.set_level(UpgradeKind::Damage, 3);
        assert!((upgrades.multiplier(UpgradeKind::Damage) - 1.3).abs() < 1e-6);
        // Other axes untouched.
        assert_eq!(upgrades.multiplier(UpgradeKind::XpGain), 1.0);
    }
}
