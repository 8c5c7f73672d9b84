use serde::{Deserialize, Serialize};

use super::{Body, EntityId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    PlaneSmall,
    PlaneLarge,
    ShipSmall,
    ShipMedium,
    Boss,
}

impl EnemyKind {
    /// Kinds anti-air weapons may engage.
    pub fn is_airborne(self) -> bool {
        matches!(self, EnemyKind::PlaneSmall | EnemyKind::PlaneLarge)
    }

    /// Kinds surface weapons may engage (ships and the boss).
    pub fn is_surface(self) -> bool {
        matches!(
            self,
            EnemyKind::ShipSmall | EnemyKind::ShipMedium | EnemyKind::Boss
        )
    }

    /// Ship hulls proper; the boss does not count toward the ship blockade cap.
    pub fn is_ship(self) -> bool {
        matches!(self, EnemyKind::ShipSmall | EnemyKind::ShipMedium)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::PlaneSmall => "PlaneSmall",
            EnemyKind::PlaneLarge => "PlaneLarge",
            EnemyKind::ShipSmall => "ShipSmall",
            EnemyKind::ShipMedium => "ShipMedium",
            EnemyKind::Boss => "Boss",
        }
    }
}

/// Race-track loop flown by both plane kinds. Turn direction is chosen at
/// the transition so each state carries only the data it needs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum FlightState {
    /// Descending toward the carrier (the large plane's bombing leg).
    Approach,
    /// 180° climb-out turn; direction is +1 (clockwise) or -1.
    TurnUp { direction: f32 },
    /// Straight climb back up the field.
    Retreat,
    /// 180° turn back onto the attack heading.
    TurnDown { direction: f32 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum EnemyState {
    /// Plane kinds fly the race-track loop.
    Flight(FlightState),
    /// Ships drift to a holding depth and sway in place.
    Station,
    /// The boss cycles attack phases in strict round-robin.
    Boss { attack_phase: u32 },
}

/// An in-progress burst: shots remaining and ticks since the last one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Burst {
    pub remaining: u32,
    pub timer: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub body: Body,
    /// Damage dealt per projectile, wave-scaled at spawn.
    pub damage: f32,
    /// Probability a fired shot targets the carrier precisely rather than
    /// with a random offset.
    pub hit_chance: f32,
    pub score_value: f32,
    pub money_value: f32,
    pub attack_cooldown: u32,
    pub burst: Option<Burst>,
    pub state: EnemyState,
    /// Per-entity phase offset so plane wobble desynchronizes.
    pub wobble_seed: f32,
    /// One-shot reward guard: set exactly once when hp crosses zero.
    pub destroyed: bool,
}
