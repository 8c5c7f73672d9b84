use serde::{Deserialize, Serialize};

/// Max level for any skill.
pub const MAX_SKILL_LEVEL: u32 = 3;

/// In-run skills offered at level-up. Permanent for the rest of the run once
/// picked; the whole set resets at run start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillKind {
    EscortLeft,
    EscortRight,
    Repair,
    Fighter,
    Bomber,
    Rocket,
}

impl SkillKind {
    pub const ALL: [SkillKind; 6] = [
        SkillKind::EscortLeft,
        SkillKind::EscortRight,
        SkillKind::Repair,
        SkillKind::Fighter,
        SkillKind::Bomber,
        SkillKind::Rocket,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillKind::EscortLeft => "escort_left",
            SkillKind::EscortRight => "escort_right",
            SkillKind::Repair => "repair",
            SkillKind::Fighter => "fighter",
            SkillKind::Bomber => "bomber",
            SkillKind::Rocket => "rocket",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SkillSet {
    pub escort_left: u32,
    pub escort_right: u32,
    pub repair: u32,
    pub fighter: u32,
    pub bomber: u32,
    pub rocket: u32,
}

impl SkillSet {
    pub fn level(&self, kind: SkillKind) -> u32 {
        match kind {
            SkillKind::EscortLeft => self.escort_left,
            SkillKind::EscortRight => self.escort_right,
            SkillKind::Repair => self.repair,
            SkillKind::Fighter => self.fighter,
            SkillKind::Bomber => self.bomber,
            SkillKind::Rocket => self.rocket,
        }
    }

    fn level_mut(&mut self, kind: SkillKind) -> &mut u32 {
        match kind {
            SkillKind::EscortLeft => &mut self.escort_left,
            SkillKind::EscortRight => &mut self.escort_right,
            SkillKind::Repair => &mut self.repair,
            SkillKind::Fighter => &mut self.fighter,
            SkillKind::Bomber => &mut self.bomber,
            SkillKind::Rocket => &mut self.rocket,
        }
    }

    /// Raise a skill by one level. Errors at the cap.
    pub fn raise(&mut self, kind: SkillKind) -> Result<u32, String> {
        let level = self.level_mut(kind);
        if *level >= MAX_SKILL_LEVEL {
            return Err(format!("{} already at max level", kind.as_str()));
        }
        *level += 1;
        Ok(*level)
    }

    /// Skills still below the cap, in declaration order.
    pub fn available(&self) -> Vec<SkillKind> {
        SkillKind::ALL
            .into_iter()
            .filter(|&k| self.level(k) < MAX_SKILL_LEVEL)
            .collect()
    }
}

// --- Per-level payout tables ---

/// Fighter squadron cap by skill level.
pub fn fighter_cap(level: u32) -> usize {
    match level {
        0 => 0,
        1 => 2,
        2 => 4,
        _ => 8,
    }
}

/// Bomber cap grows one per level.
pub fn bomber_cap(level: u32) -> usize {
    level as usize
}

/// Escort main-battery per-shell damage by skill level (before the twin
/// mount doubling and the damage upgrade multiplier).
pub fn escort_cannon_damage(level: u32) -> f32 {
    match level {
        1 => 100.0,
        2 => 150.0,
        _ => 300.0,
    }
}

/// Rear rocket damage by skill level.
pub fn rocket_damage(level: u32) -> f32 {
    match level {
        1 => 200.0,
        2 => 300.0,
        _ => 400.0,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RepairProfile {
    pub interval_ticks: u32,
    pub amount: f32,
}

/// Repair station output. Level 3 is a breakpoint: the heal amount rises
/// and the interval halves at the same time.
pub fn repair_profile(level: u32) -> Option<RepairProfile> {
    match level {
        0 => None,
        1 => Some(RepairProfile {
            interval_ticks: 300,
            amount: 2.0,
        }),
        2 => Some(RepairProfile {
            interval_ticks: 300,
            amount: 4.0,
        }),
        _ => Some(RepairProfile {
            interval_ticks: 150,
            amount: 5.0,
        }),
    }
}
