use serde::{Deserialize, Serialize};

use super::{Body, EntityId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    Bullet,
    Cannon,
    Bomb,
    Rocket,
}

impl ProjectileKind {
    /// Heavy ordnance throws a large splash when it lands in the water.
    pub fn is_heavy(self) -> bool {
        matches!(
            self,
            ProjectileKind::Cannon | ProjectileKind::Bomb | ProjectileKind::Rocket
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
    Friendly,
}

/// Which enemy kinds a projectile is permitted to damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetAffinity {
    Air,
    Water,
    Both,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub kind: ProjectileKind,
    pub body: Body,
    pub damage: f32,
    pub owner: Owner,
    pub affinity: TargetAffinity,
    /// Rockets re-aim toward this entity every tick while it lives; a dead
    /// reference falls through to straight-line flight.
    pub homing_target: Option<EntityId>,
    /// Arc-landing budget: cannon shells and bombs fired at a known target
    /// detonate in place after traveling this far.
    pub max_travel: Option<f32>,
    pub traveled: f32,
}
