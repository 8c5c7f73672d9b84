//! Projectile motion, homing, collision, and damage resolution, including
//! the derived progression events (kills, XP, money, game-over).

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaChaRng;

use crate::engine::config;
use crate::entities::enemy::Enemy;
use crate::entities::projectile::{Owner, ProjectileKind, TargetAffinity};
use crate::entities::store::EntityStore;
use crate::events::game_events::{
    EnemyDestroyedEvent, ExplosionEvent, ExplosionSize, GameEvent, HitEvent, HitTarget,
    SplashEvent, SplashSize,
};
use crate::state::run_state::PlayerStats;
use crate::state::upgrades::{UpgradeKind, UpgradeLevels};

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectileOutcome {
    /// Level-ups earned this tick; the clock suspends for a reward pick.
    pub level_ups: u32,
    /// The carrier was sunk this tick.
    pub game_over: bool,
}

pub fn run(
    store: &mut EntityStore,
    stats: &mut PlayerStats,
    upgrades: &UpgradeLevels,
    rng: &mut ChaChaRng,
    tick: u64,
    events: &mut Vec<GameEvent>,
) -> ProjectileOutcome {
    let xp_mult = upgrades.multiplier(UpgradeKind::XpGain);
    let money_mult = upgrades.multiplier(UpgradeKind::MoneyGain);
    let mut outcome = ProjectileOutcome::default();

    let EntityStore {
        enemies,
        projectiles,
        ..
    } = store;

    for projectile in projectiles.iter_mut() {
        let speed = projectile.body.vel.length();
        projectile.body.pos += projectile.body.vel;
        projectile.traveled += speed;

        // Travel budget exhausted: detonate in place with a splash, skipping
        // the collision check this tick.
        if let Some(max_travel) = projectile.max_travel {
            if projectile.traveled >= max_travel {
                projectile.body.marked_for_deletion = true;
                events.push(GameEvent::Splash(SplashEvent {
                    size: if projectile.kind.is_heavy() {
                        SplashSize::Large
                    } else {
                        SplashSize::Small
                    },
                    x: projectile.body.pos.x,
                    y: projectile.body.pos.y,
                    tick,
                }));
                continue;
            }
        }

        // Homing correction toward the live target; a dead reference leaves
        // the rocket on its last heading.
        if let Some(target_id) = projectile.homing_target {
            if let Some(target) = enemies
                .iter()
                .find(|e| e.id == target_id && !e.body.marked_for_deletion)
            {
                let delta = target.body.pos - projectile.body.pos;
                let angle = delta.y.atan2(delta.x);
                projectile.body.rotation = angle;
                projectile.body.vel = Vec2::from_angle(angle) * config::ROCKET_HOMING_SPEED;
            }
        }

        match projectile.owner {
            Owner::Player | Owner::Friendly => {
                for enemy in enemies.iter_mut() {
                    if projectile.body.marked_for_deletion {
                        break;
                    }
                    let can_hit = match projectile.affinity {
                        TargetAffinity::Both => true,
                        TargetAffinity::Air => enemy.kind.is_airborne(),
                        TargetAffinity::Water => enemy.kind.is_surface(),
                    };
                    if !can_hit {
                        continue;
                    }
                    if projectile.body.pos.distance(enemy.body.pos) >= enemy.body.hit_radius() {
                        continue;
                    }

                    // First matching hit consumes the projectile.
                    projectile.body.marked_for_deletion = true;
                    enemy.body.hp -= projectile.damage;
                    events.push(GameEvent::Hit(HitEvent {
                        target: HitTarget::Enemy,
                        x: projectile.body.pos.x,
                        y: projectile.body.pos.y,
                        tick,
                    }));

                    if enemy.kind.is_airborne() && enemy.body.hp > 0.0 {
                        maybe_add_damage_point(enemy, rng);
                    }

                    if projectile.kind == ProjectileKind::Bomb
                        && projectile.owner == Owner::Friendly
                    {
                        events.push(GameEvent::Explosion(ExplosionEvent {
                            size: ExplosionSize::ExtraLarge,
                            x: projectile.body.pos.x,
                            y: projectile.body.pos.y,
                            tick,
                        }));
                    }

                    if enemy.body.hp <= 0.0 && !enemy.destroyed {
                        // Exactly-once kill resolution, guarded against a
                        // second lethal hit in the same tick.
                        enemy.destroyed = true;
                        enemy.body.marked_for_deletion = true;
                        let xp = enemy.score_value * xp_mult;
                        let money = enemy.money_value * money_mult;
                        stats.money += money;
                        events.push(GameEvent::Explosion(ExplosionEvent {
                            size: ExplosionSize::Large,
                            x: enemy.body.pos.x,
                            y: enemy.body.pos.y,
                            tick,
                        }));
                        events.push(GameEvent::EnemyDestroyed(EnemyDestroyedEvent {
                            enemy_id: enemy.id.0,
                            kind: enemy.kind,
                            xp_awarded: xp,
                            money_awarded: money,
                            tick,
                        }));
                        if stats.award_xp(xp) {
                            outcome.level_ups += 1;
                        }
                    }
                }
            }
            Owner::Enemy => {
                // Enemy fire only tests the carrier's fixed bounding box.
                let delta = projectile.body.pos - config::CARRIER_CENTER;
                if delta.x.abs() < config::CARRIER_HALF_WIDTH
                    && delta.y.abs() < config::CARRIER_HALF_HEIGHT
                {
                    projectile.body.marked_for_deletion = true;
                    if projectile.kind == ProjectileKind::Bomb {
                        events.push(GameEvent::Explosion(ExplosionEvent {
                            size: ExplosionSize::Large,
                            x: projectile.body.pos.x,
                            y: projectile.body.pos.y,
                            tick,
                        }));
                    } else {
                        events.push(GameEvent::Hit(HitEvent {
                            target: HitTarget::Carrier,
                            x: projectile.body.pos.x,
                            y: projectile.body.pos.y,
                            tick,
                        }));
                    }
                    if stats.apply_damage(projectile.damage) {
                        outcome.game_over = true;
                    }
                }
            }
        }

        // Leaving the playfield destroys a projectile with no side effects.
        let pos = projectile.body.pos;
        if pos.x < 0.0
            || pos.x > config::FIELD_WIDTH
            || pos.y < -config::PROJECTILE_TOP_MARGIN
            || pos.y > config::FIELD_HEIGHT
        {
            projectile.body.marked_for_deletion = true;
        }
    }

    outcome
}

/// Damaged airborne hulls pick up persistent fire anchors, capped by how
/// low their hp has fallen.
fn maybe_add_damage_point(enemy: &mut Enemy, rng: &mut ChaChaRng) {
    let hp_fraction = enemy.body.hp / enemy.body.max_hp;
    let max_fires = if hp_fraction < 0.3 {
        3
    } else if hp_fraction < 0.6 {
        2
    } else {
        1
    };
    if enemy.body.damage_points.len() < max_fires && rng.gen::<f32>() < config::DAMAGE_POINT_CHANCE
    {
        enemy.body.damage_points.push(Vec2::new(
            (rng.gen::<f32>() - 0.5) * config::DAMAGE_POINT_SPREAD_X,
            (rng.gen::<f32>() - 0.5) * config::DAMAGE_POINT_SPREAD_Y,
        ));
    }
}
