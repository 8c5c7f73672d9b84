use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entities::enemy::EnemyKind;
use crate::entities::friendly::FriendlyKind;
use crate::entities::projectile::{Owner, ProjectileKind};
use crate::entities::store::EntityStore;
use crate::state::run_state::PlayerStats;

/// Per-kind payload attached to an entity snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntityExtra {
    Enemy {
        kind: EnemyKind,
        hp_fraction: f32,
        damage_points: Vec<Vec2>,
    },
    Projectile {
        kind: ProjectileKind,
        owner: Owner,
    },
    Friendly {
        kind: FriendlyKind,
        state: String,
        ammo: u32,
        max_ammo: u32,
        damage_points: Vec<Vec2>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub vx: f32,
    pub vy: f32,
    pub extra: EntityExtra,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub hp: f32,
    pub max_hp: f32,
    pub xp: f32,
    pub max_xp: f32,
    pub level: u32,
    pub money: f32,
    pub wave: u32,
}

/// Serializable view of one tick, consumed by rendering/audio collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub tick: u64,
    pub phase: String,
    pub player: PlayerSnapshot,
    pub entities: Vec<EntitySnapshot>,
}

/// Build a snapshot of the current world state without advancing it.
pub fn build(store: &EntityStore, stats: &PlayerStats, tick: u64, phase: &str) -> StateSnapshot {
    let mut entities = Vec::with_capacity(
        store.enemies.len() + store.projectiles.len() + store.friendlies.len(),
    );

    for e in &store.enemies {
        entities.push(EntitySnapshot {
            id: e.id.0,
            x: e.body.pos.x,
            y: e.body.pos.y,
            rotation: e.body.rotation,
            vx: e.body.vel.x,
            vy: e.body.vel.y,
            extra: EntityExtra::Enemy {
                kind: e.kind,
                hp_fraction: e.body.hp_fraction(),
                damage_points: e.body.damage_points.clone(),
            },
        });
    }

    for p in &store.projectiles {
        entities.push(EntitySnapshot {
            id: p.id.0,
            x: p.body.pos.x,
            y: p.body.pos.y,
            rotation: p.body.rotation,
            vx: p.body.vel.x,
            vy: p.body.vel.y,
            extra: EntityExtra::Projectile {
                kind: p.kind,
                owner: p.owner,
            },
        });
    }

    for f in &store.friendlies {
        entities.push(EntitySnapshot {
            id: f.id.0,
            x: f.body.pos.x,
            y: f.body.pos.y,
            rotation: f.body.rotation,
            vx: f.body.vel.x,
            vy: f.body.vel.y,
            extra: EntityExtra::Friendly {
                kind: f.kind,
                state: f.state.as_str().to_string(),
                ammo: f.ammo,
                max_ammo: f.max_ammo,
                damage_points: f.body.damage_points.clone(),
            },
        });
    }

    StateSnapshot {
        tick,
        phase: phase.to_string(),
        player: PlayerSnapshot {
            hp: stats.hp,
            max_hp: stats.max_hp,
            xp: stats.xp,
            max_xp: stats.max_xp,
            level: stats.level,
            money: stats.money,
            wave: stats.wave,
        },
        entities,
    }
}
