//! Carrier- and escort-mounted weapons: independent cooldowns, target
//! selection, staggered volleys, and the fire primitive shared with the
//! enemy and friendly behavior systems.

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaChaRng;

use crate::engine::config;
use crate::entities::projectile::{Owner, Projectile, ProjectileKind, TargetAffinity};
use crate::entities::store::EntityStore;
use crate::entities::{Body, EntityId};
use crate::events::game_events::{
    BombDroppedEvent, GameEvent, ShotCategory, ShotFiredEvent,
};
use crate::state::run_state::PlayerStats;
use crate::state::skills::{self, SkillKind, SkillSet};
use crate::state::upgrades::{UpgradeKind, UpgradeLevels};

/// An aim point, optionally backed by a live entity (rockets home on it).
#[derive(Debug, Clone, Copy)]
pub struct AimTarget {
    pub pos: Vec2,
    pub entity: Option<EntityId>,
}

/// One firing request for the fire primitive.
#[derive(Debug, Clone, Copy)]
pub struct FireParams {
    pub origin: Vec2,
    /// Used when no target is given.
    pub heading: f32,
    pub target: Option<AimTarget>,
    pub kind: ProjectileKind,
    pub owner: Owner,
    pub damage: f32,
}

/// A shot deferred to a later tick. Staggered volleys live here so that
/// pausing the clock pauses them too. The target is re-resolved at fire
/// time; a dead target leaves the shot aimed at its last known position.
#[derive(Debug, Clone)]
pub struct ScheduledShot {
    pub fire_at: u64,
    pub origin: Vec2,
    pub target: EntityId,
    pub fallback: Vec2,
    pub kind: ProjectileKind,
    pub damage: f32,
}

/// Cooldown counters for every mounted weapon, plus the deferred queue.
/// Counters go negative after a volley to model recovery time.
#[derive(Debug, Clone, Default)]
pub struct WeaponState {
    pub medium: i32,
    pub aa: i32,
    pub escort_main: [i32; 2],
    pub escort_small: [i32; 2],
    pub escort_aa: [i32; 2],
    pub rocket: i32,
    pub repair: i32,
    pub deferred: Vec<ScheduledShot>,
}

pub fn run(
    store: &mut EntityStore,
    weapons: &mut WeaponState,
    skill_set: &SkillSet,
    upgrades: &UpgradeLevels,
    stats: &mut PlayerStats,
    rng: &mut ChaChaRng,
    tick: u64,
    events: &mut Vec<GameEvent>,
) {
    let dmg_mult = upgrades.multiplier(UpgradeKind::Damage);
    let carrier = config::CARRIER_CENTER;

    // Repair station: not a projectile weapon, just a heal on cooldown.
    if let Some(profile) = skills::repair_profile(skill_set.level(SkillKind::Repair)) {
        weapons.repair += 1;
        if weapons.repair >= profile.interval_ticks as i32 {
            stats.heal(profile.amount);
            weapons.repair = 0;
        }
    }

    // Carrier medium guns: nearest on-field surface target, triple volley
    // from both mounts.
    weapons.medium += 1;
    if weapons.medium >= config::MEDIUM_GUN_INTERVAL {
        let target = store
            .nearest_enemy_where(carrier, |e| e.kind.is_surface() && e.body.pos.y > 0.0)
            .map(|e| (e.id, e.body.pos));
        if let Some((target_id, target_pos)) = target {
            for mount in config::MEDIUM_MOUNTS {
                for volley in 0..config::MEDIUM_GUN_VOLLEYS {
                    weapons.deferred.push(ScheduledShot {
                        fire_at: tick + volley as u64 * config::MEDIUM_SHOT_SPACING_TICKS,
                        origin: carrier + mount,
                        target: target_id,
                        fallback: target_pos,
                        kind: ProjectileKind::Cannon,
                        damage: config::MEDIUM_GUN_DAMAGE * dmg_mult,
                    });
                }
            }
            weapons.medium = -config::VOLLEY_RECOVERY_TICKS;
        }
    }

    // Carrier AA battery: random airborne target, every mount fires each round.
    weapons.aa += 1;
    if weapons.aa >= config::AA_INTERVAL {
        if let Some((target_id, target_pos)) = random_airborne(store, rng) {
            for round in 0..config::AA_ROUNDS {
                for mount in config::AA_MOUNTS {
                    weapons.deferred.push(ScheduledShot {
                        fire_at: tick + round as u64 * config::AA_ROUND_SPACING_TICKS,
                        origin: carrier + mount,
                        target: target_id,
                        fallback: target_pos,
                        kind: ProjectileKind::Bullet,
                        damage: config::AA_DAMAGE * dmg_mult,
                    });
                }
            }
            weapons.aa = -config::VOLLEY_RECOVERY_TICKS;
        }
    }

    // Escorts, one per side while the skill is active.
    for side in 0..2 {
        let (skill, sign) = if side == 0 {
            (SkillKind::EscortLeft, -1.0)
        } else {
            (SkillKind::EscortRight, 1.0)
        };
        let level = skill_set.level(skill);
        if level == 0 {
            continue;
        }
        let hull = carrier + Vec2::new(config::ESCORT_OFFSET.x * sign, config::ESCORT_OFFSET.y);

        weapons.escort_main[side] += 1;
        if weapons.escort_main[side] >= config::ESCORT_MAIN_INTERVAL {
            let target = store.nearest_surface(hull).map(|e| e.body.pos);
            if let Some(target_pos) = target {
                let damage = skills::escort_cannon_damage(level) * 2.0 * dmg_mult;
                for mount in config::ESCORT_MAIN_MOUNTS {
                    fire(
                        store,
                        rng,
                        upgrades,
                        events,
                        tick,
                        FireParams {
                            origin: hull + mount,
                            heading: 0.0,
                            target: Some(AimTarget {
                                pos: target_pos,
                                entity: None,
                            }),
                            kind: ProjectileKind::Cannon,
                            owner: Owner::Player,
                            damage,
                        },
                    );
                }
                weapons.escort_main[side] = 0;
            }
        }

        weapons.escort_small[side] += 1;
        if weapons.escort_small[side] >= config::ESCORT_SMALL_INTERVAL {
            let target = store
                .nearest_enemy_where(hull, |e| e.kind.is_ship())
                .map(|e| (e.id, e.body.pos));
            if let Some((target_id, target_pos)) = target {
                for volley in 0..config::ESCORT_SMALL_VOLLEYS {
                    weapons.deferred.push(ScheduledShot {
                        fire_at: tick + volley as u64 * config::MEDIUM_SHOT_SPACING_TICKS,
                        origin: hull + config::ESCORT_SMALL_MOUNT,
                        target: target_id,
                        fallback: target_pos,
                        kind: ProjectileKind::Cannon,
                        damage: config::ESCORT_SMALL_DAMAGE * dmg_mult,
                    });
                }
                weapons.escort_small[side] = 0;
            }
        }

        weapons.escort_aa[side] += 1;
        if weapons.escort_aa[side] >= config::ESCORT_AA_INTERVAL {
            if let Some((target_id, target_pos)) = random_airborne(store, rng) {
                for round in 0..config::ESCORT_AA_ROUNDS {
                    weapons.deferred.push(ScheduledShot {
                        fire_at: tick + round as u64 * config::AA_ROUND_SPACING_TICKS,
                        origin: hull + config::ESCORT_AA_MOUNT,
                        target: target_id,
                        fallback: target_pos,
                        kind: ProjectileKind::Bullet,
                        damage: config::ESCORT_AA_DAMAGE * dmg_mult,
                    });
                }
                weapons.escort_aa[side] = 0;
            }
        }
    }

    // Rear rocket battery: the boss first, else the nearest ship.
    let rocket_level = skill_set.level(SkillKind::Rocket);
    if rocket_level > 0 {
        weapons.rocket += 1;
        if weapons.rocket >= config::ROCKET_INTERVAL {
            let mount = carrier + config::ROCKET_MOUNT;
            let target = store
                .nearest_enemy_where(mount, |e| e.kind == crate::entities::enemy::EnemyKind::Boss)
                .or_else(|| store.nearest_enemy_where(mount, |e| e.kind.is_ship()))
                .map(|e| (e.id, e.body.pos));
            if let Some((target_id, target_pos)) = target {
                fire(
                    store,
                    rng,
                    upgrades,
                    events,
                    tick,
                    FireParams {
                        origin: mount,
                        heading: 0.0,
                        target: Some(AimTarget {
                            pos: target_pos,
                            entity: Some(target_id),
                        }),
                        kind: ProjectileKind::Rocket,
                        owner: Owner::Player,
                        damage: skills::rocket_damage(rocket_level) * dmg_mult,
                    },
                );
                weapons.rocket = 0;
            }
        }
    }

    // Drain everything due this tick, including shots scheduled just above,
    // so the first round of a volley leaves on the trigger tick.
    let mut due = Vec::new();
    weapons.deferred.retain(|shot| {
        if shot.fire_at <= tick {
            due.push(shot.clone());
            false
        } else {
            true
        }
    });
    for shot in due {
        let aim = store
            .enemy(shot.target)
            .map(|e| e.body.pos)
            .unwrap_or(shot.fallback);
        fire(
            store,
            rng,
            upgrades,
            events,
            tick,
            FireParams {
                origin: shot.origin,
                heading: 0.0,
                target: Some(AimTarget {
                    pos: aim,
                    entity: None,
                }),
                kind: shot.kind,
                owner: Owner::Player,
                damage: shot.damage,
            },
        );
    }
}

fn random_airborne(store: &EntityStore, rng: &mut ChaChaRng) -> Option<(EntityId, Vec2)> {
    let planes: Vec<(EntityId, Vec2)> = store
        .enemies
        .iter()
        .filter(|e| e.kind.is_airborne() && !e.body.marked_for_deletion && !e.destroyed)
        .map(|e| (e.id, e.body.pos))
        .collect();
    if planes.is_empty() {
        None
    } else {
        Some(planes[rng.gen_range(0..planes.len())])
    }
}

/// The fire primitive. Computes a firing angle (toward the target if given,
/// else the source heading), applies owner-dependent angular jitter, offsets
/// the muzzle along the angle, and constructs a projectile with
/// kind-appropriate speed/size/affinity. Cannon and bomb shots at a known
/// target record the straight-line distance as their travel budget so they
/// arc-land instead of flying forever.
pub fn fire(
    store: &mut EntityStore,
    rng: &mut ChaChaRng,
    upgrades: &UpgradeLevels,
    events: &mut Vec<GameEvent>,
    tick: u64,
    params: FireParams,
) -> EntityId {
    let mut angle = match &params.target {
        Some(t) => {
            let delta = t.pos - params.origin;
            delta.y.atan2(delta.x)
        }
        None => params.heading,
    };

    match params.owner {
        Owner::Player => {
            let accuracy = upgrades.multiplier(UpgradeKind::Accuracy);
            angle += (rng.gen::<f32>() - 0.5) * (config::PLAYER_BASE_SPREAD / accuracy);
        }
        _ => {
            let spread = if params.kind == ProjectileKind::Bullet {
                config::ENEMY_BULLET_SPREAD
            } else {
                config::ENEMY_HEAVY_SPREAD
            };
            angle += (rng.gen::<f32>() - 0.5) * spread;
        }
    }

    let muzzle_offset = match params.kind {
        ProjectileKind::Cannon => config::MUZZLE_OFFSET_CANNON,
        ProjectileKind::Rocket => config::MUZZLE_OFFSET_ROCKET,
        _ => config::MUZZLE_OFFSET_DEFAULT,
    };
    let muzzle = params.origin + Vec2::from_angle(angle) * muzzle_offset;

    let speed = match params.kind {
        ProjectileKind::Rocket => config::ROCKET_LAUNCH_SPEED,
        _ => {
            let speed_mult = if params.owner == Owner::Player {
                upgrades.multiplier(UpgradeKind::ProjectileSpeed)
            } else {
                1.0
            };
            config::PROJECTILE_SPEED * speed_mult
        }
    };

    let affinity = match (params.owner, params.kind) {
        (Owner::Enemy, _) => TargetAffinity::Water,
        (Owner::Player, ProjectileKind::Bullet) => TargetAffinity::Air,
        (_, ProjectileKind::Bullet) | (_, ProjectileKind::Rocket) => TargetAffinity::Both,
        _ => TargetAffinity::Water,
    };

    let max_travel = match params.kind {
        ProjectileKind::Cannon | ProjectileKind::Bomb => {
            params.target.as_ref().map(|t| (t.pos - params.origin).length())
        }
        _ => None,
    };
    let homing_target = if params.kind == ProjectileKind::Rocket {
        params.target.as_ref().and_then(|t| t.entity)
    } else {
        None
    };

    let mut body = Body::new(muzzle, config::projectile_size(params.kind), 1.0, angle);
    body.vel = Vec2::from_angle(angle) * speed;

    let id = store.ids.allocate();
    store.projectiles.push(Projectile {
        id,
        kind: params.kind,
        body,
        damage: params.damage,
        owner: params.owner,
        affinity,
        homing_target,
        max_travel,
        traveled: 0.0,
    });

    events.push(match params.kind {
        ProjectileKind::Bomb => GameEvent::BombDropped(BombDroppedEvent {
            x: muzzle.x,
            y: muzzle.y,
            tick,
        }),
        kind => GameEvent::ShotFired(ShotFiredEvent {
            category: match kind {
                ProjectileKind::Bullet => ShotCategory::MachineGun,
                ProjectileKind::Rocket => ShotCategory::Rocket,
                _ => ShotCategory::Cannon,
            },
            x: muzzle.x,
            y: muzzle.y,
            tick,
        }),
    });

    id
}
