//! Deployable friendly aircraft: hangar spawn gating and the
//! launch/combat/return/land/rearm state machine.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaChaRng;

use crate::engine::config;
use crate::entities::enemy::Enemy;
use crate::entities::friendly::{FriendlyKind, FriendlyState, FriendlyUnit};
use crate::entities::projectile::{Owner, ProjectileKind};
use crate::entities::store::EntityStore;
use crate::entities::Body;
use crate::events::game_events::GameEvent;
use crate::state::skills::{self, SkillKind, SkillSet};
use crate::state::upgrades::UpgradeLevels;
use crate::systems::weapons::{self, AimTarget, FireParams};

/// Spawn-interval cooldowns for each aircraft kind. They only advance while
/// the squadron is below its skill-granted cap.
#[derive(Debug, Clone, Default)]
pub struct HangarState {
    pub fighter_spawn: u32,
    pub bomber_spawn: u32,
}

/// Copied-out view of a potential target, so the unit loop can hold a
/// mutable borrow of its own collection.
#[derive(Debug, Clone, Copy)]
struct TargetInfo {
    pos: Vec2,
    rotation: f32,
    width: f32,
    airborne: bool,
}

impl TargetInfo {
    fn of(enemy: &Enemy) -> Self {
        Self {
            pos: enemy.body.pos,
            rotation: enemy.body.rotation,
            width: enemy.body.size.x,
            airborne: enemy.kind.is_airborne(),
        }
    }
}

pub fn run(
    store: &mut EntityStore,
    hangar: &mut HangarState,
    skill_set: &SkillSet,
    upgrades: &UpgradeLevels,
    rng: &mut ChaChaRng,
    tick: u64,
    events: &mut Vec<GameEvent>,
) {
    let fighter_level = skill_set.level(SkillKind::Fighter);
    if fighter_level > 0
        && store.friendly_count(FriendlyKind::Fighter) < skills::fighter_cap(fighter_level)
    {
        hangar.fighter_spawn += 1;
        if hangar.fighter_spawn > config::FIGHTER_SPAWN_INTERVAL {
            spawn_unit(store, FriendlyKind::Fighter);
            hangar.fighter_spawn = 0;
        }
    }

    let bomber_level = skill_set.level(SkillKind::Bomber);
    if bomber_level > 0
        && store.friendly_count(FriendlyKind::Bomber) < skills::bomber_cap(bomber_level)
    {
        hangar.bomber_spawn += 1;
        if hangar.bomber_spawn > config::BOMBER_SPAWN_INTERVAL {
            spawn_unit(store, FriendlyKind::Bomber);
            hangar.bomber_spawn = 0;
        }
    }

    // Parking slots are indexed by pre-update rearming rank so the queue
    // stays stable within the tick.
    let rearm_ranks: Vec<usize> = {
        let mut next = 0;
        store
            .friendlies
            .iter()
            .map(|f| {
                if f.state.is_rearming() {
                    let rank = next;
                    next += 1;
                    rank
                } else {
                    0
                }
            })
            .collect()
    };

    let carrier = config::CARRIER_CENTER;
    let mut shots: Vec<FireParams> = Vec::new();

    for i in 0..store.friendlies.len() {
        let unit_pos = store.friendlies[i].body.pos;
        let plane_target = store.nearest_airborne(unit_pos).map(TargetInfo::of);
        let surface_target = store.nearest_surface(unit_pos).map(TargetInfo::of);
        let unit = &mut store.friendlies[i];

        match unit.state {
            FriendlyState::Launching => {
                if unit.body.vel.y > -config::LAUNCH_MAX_SPEED {
                    unit.body.vel.y -= config::LAUNCH_ACCEL;
                }
                unit.body.pos.y += unit.body.vel.y;
                unit.body.pos.x = carrier.x;
                unit.body.rotation = -FRAC_PI_2;
                if unit.body.pos.y < carrier.y - config::LAUNCH_EXIT_OFFSET {
                    unit.state = FriendlyState::Airborne { drop_timer: 0 };
                }
            }
            FriendlyState::Airborne { .. } => {
                if unit.ammo == 0 {
                    unit.state = FriendlyState::Returning;
                } else {
                    match unit.kind {
                        FriendlyKind::Fighter => {
                            fighter_combat(unit, plane_target, surface_target, rng, &mut shots)
                        }
                        FriendlyKind::Bomber => {
                            bomber_combat(unit, surface_target, rng, &mut shots)
                        }
                    }
                }
            }
            FriendlyState::Returning => {
                let approach = Vec2::new(carrier.x, carrier.y + config::APPROACH_OFFSET_Y);
                let delta = approach - unit.body.pos;
                let dist = delta.length();
                let angle = delta.y.atan2(delta.x);
                unit.body.rotation = angle;
                unit.body.pos += Vec2::from_angle(angle) * config::RETURN_SPEED;
                if dist < config::APPROACH_CAPTURE_DIST {
                    unit.body.pos = approach;
                    unit.body.rotation = -FRAC_PI_2;
                    unit.state = FriendlyState::Landing;
                }
            }
            FriendlyState::Landing => {
                let stern_y = carrier.y + config::STERN_OFFSET_Y;
                if (unit.body.pos.y - stern_y).abs() < config::LAND_CAPTURE_DIST {
                    unit.body.pos.y = stern_y;
                    unit.state = FriendlyState::Rearming {
                        timer: config::REARM_TICKS,
                    };
                } else {
                    let land_speed = match unit.kind {
                        FriendlyKind::Fighter => config::FIGHTER_LAND_SPEED,
                        FriendlyKind::Bomber => config::BOMBER_LAND_SPEED,
                    };
                    unit.body.pos.y -= land_speed;
                    unit.body.pos.x = carrier.x;
                    unit.body.rotation = -FRAC_PI_2;
                }
            }
            FriendlyState::Rearming { .. } => {
                let park_y = (carrier.y
                    + config::PARK_FIRST_OFFSET_Y
                    + rearm_ranks[i] as f32 * config::PARK_SPACING_Y)
                    .min(carrier.y + config::PARK_LIMIT_OFFSET_Y);
                let offset = unit.body.pos.y - park_y;
                if offset.abs() > config::TAXI_SPEED {
                    unit.body.pos.y -= offset.signum() * config::TAXI_SPEED;
                } else {
                    unit.body.pos.y = park_y;
                }
                unit.body.pos.x = carrier.x;
                unit.body.rotation = -FRAC_PI_2;

                let mut done = false;
                if let FriendlyState::Rearming { timer } = &mut unit.state {
                    if *timer > 0 {
                        *timer -= 1;
                    } else {
                        done = true;
                    }
                }
                if done {
                    unit.body.hp = unit.body.max_hp;
                    unit.ammo = unit.max_ammo;
                    unit.body.damage_points.clear();
                    unit.body.vel = Vec2::new(0.0, -config::RELAUNCH_SPEED);
                    unit.state = FriendlyState::Launching;
                }
            }
        }
    }

    for params in shots {
        weapons::fire(store, rng, upgrades, events, tick, params);
    }
}

fn spawn_unit(store: &mut EntityStore, kind: FriendlyKind) {
    let (size, ammo, launch_speed) = match kind {
        FriendlyKind::Fighter => (
            config::FIGHTER_SIZE,
            config::FIGHTER_MAX_AMMO,
            config::FIGHTER_LAUNCH_SPEED,
        ),
        FriendlyKind::Bomber => (
            config::BOMBER_SIZE,
            config::BOMBER_MAX_AMMO,
            config::BOMBER_LAUNCH_SPEED,
        ),
    };
    let id = store.ids.allocate();
    let mut body = Body::new(config::CARRIER_CENTER, size, config::FRIENDLY_MAX_HP, -FRAC_PI_2);
    body.vel = Vec2::new(0.0, -launch_speed);
    store.friendlies.push(FriendlyUnit {
        id,
        kind,
        body,
        ammo,
        max_ammo: ammo,
        state: FriendlyState::Launching,
    });
}

/// Fighters prefer airborne prey, falling back to surface targets. Chasing a
/// plane means holding a stand-off point behind it; bombing a ship means
/// getting right on top of it.
fn fighter_combat(
    unit: &mut FriendlyUnit,
    plane_target: Option<TargetInfo>,
    surface_target: Option<TargetInfo>,
    rng: &mut ChaChaRng,
    shots: &mut Vec<FireParams>,
) {
    let Some(target) = plane_target.or(surface_target) else {
        // Patrol upward, flipping at the top edge.
        unit.body.pos.y -= config::PATROL_SPEED;
        if unit.body.pos.y < 0.0 {
            unit.body.pos.y = 0.0;
            unit.body.rotation += PI;
        }
        return;
    };

    let dest = if target.airborne {
        target.pos - Vec2::from_angle(target.rotation) * (target.width * config::CHASE_STANDOFF_WIDTHS)
    } else {
        target.pos
    };
    let delta = dest - unit.body.pos;
    let dist = delta.length();
    let angle = delta.y.atan2(delta.x);
    unit.body.rotation = angle;
    unit.body.pos += Vec2::from_angle(angle) * dist.min(config::FIGHTER_SPEED);
    if dist < config::FORMATION_ALIGN_DIST && target.airborne {
        unit.body.rotation = target.rotation;
    }

    if rng.gen::<f32>() < config::FIGHTER_FIRE_PROB {
        if target.airborne {
            if unit.body.pos.distance(target.pos) < config::FIGHTER_GUN_RANGE {
                shots.push(FireParams {
                    origin: unit.body.pos,
                    heading: unit.body.rotation,
                    target: Some(AimTarget {
                        pos: target.pos,
                        entity: None,
                    }),
                    kind: ProjectileKind::Bullet,
                    owner: Owner::Friendly,
                    damage: config::FIGHTER_GUN_DAMAGE,
                });
                unit.ammo = unit.ammo.saturating_sub(config::FIGHTER_GUN_AMMO_COST);
            }
        } else {
            let offset = target.pos - unit.body.pos;
            if offset.x.abs() < config::FIGHTER_BOMB_BOX && offset.y.abs() < config::FIGHTER_BOMB_BOX
            {
                shots.push(FireParams {
                    origin: unit.body.pos,
                    heading: unit.body.rotation,
                    target: Some(AimTarget {
                        pos: target.pos,
                        entity: None,
                    }),
                    kind: ProjectileKind::Bomb,
                    owner: Owner::Friendly,
                    damage: config::FIGHTER_BOMB_DAMAGE,
                });
                unit.ammo = unit.ammo.saturating_sub(config::FIGHTER_BOMB_AMMO_COST);
            }
        }
    }
}

/// Bombers fly straight through the target, locking heading on final
/// approach, and roll each drop independently for hit or miss.
fn bomber_combat(
    unit: &mut FriendlyUnit,
    surface_target: Option<TargetInfo>,
    rng: &mut ChaChaRng,
    shots: &mut Vec<FireParams>,
) {
    let Some(target) = surface_target else {
        unit.body.pos.y -= config::PATROL_SPEED;
        if unit.body.pos.y < -100.0 {
            unit.body.pos.y = config::FIELD_HEIGHT;
        }
        return;
    };

    let delta = target.pos - unit.body.pos;
    let dist = delta.length();
    if dist > config::BOMBER_HEADING_LOCK_DIST {
        unit.body.rotation = delta.y.atan2(delta.x);
    }
    unit.body.pos += Vec2::from_angle(unit.body.rotation) * config::BOMBER_SPEED;

    let mut ready = false;
    if let FriendlyState::Airborne { drop_timer } = &mut unit.state {
        if *drop_timer > 0 {
            *drop_timer -= 1;
        }
        ready = *drop_timer == 0;
    }

    if dist < config::BOMBER_DROP_RANGE && unit.ammo > 0 && ready {
        let aim = if rng.gen::<f32>() < config::BOMBER_HIT_CHANCE {
            target.pos
        } else {
            // A miss is aimed beside the hull, into open water.
            let offset =
                target.width + config::BOMB_MISS_MARGIN + rng.gen::<f32>() * config::BOMB_MISS_SPREAD;
            let side = if rng.gen::<bool>() { 1.0 } else { -1.0 };
            target.pos
                + Vec2::new(
                    offset * side,
                    (rng.gen::<f32>() - 0.5) * config::BOMB_MISS_JITTER,
                )
        };
        shots.push(FireParams {
            origin: unit.body.pos,
            heading: unit.body.rotation,
            target: Some(AimTarget {
                pos: aim,
                entity: None,
            }),
            kind: ProjectileKind::Bomb,
            owner: Owner::Friendly,
            damage: config::BOMBER_BOMB_DAMAGE,
        });
        unit.ammo -= 1;
        if let FriendlyState::Airborne { drop_timer } = &mut unit.state {
            *drop_timer = config::BOMBER_DROP_COOLDOWN;
        }
    }
}
