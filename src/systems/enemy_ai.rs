//! Per-kind enemy state machines: plane race-track loops, ship
//! station-keeping, and the boss attack rotation, plus all enemy firing.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaChaRng;

use crate::engine::config;
use crate::entities::enemy::{Burst, Enemy, EnemyKind, EnemyState, FlightState};
use crate::entities::projectile::{Owner, ProjectileKind};
use crate::entities::store::EntityStore;
use crate::entities::Body;
use crate::events::game_events::GameEvent;
use crate::state::upgrades::UpgradeLevels;
use crate::systems::weapons::{self, AimTarget, FireParams};

pub fn run(
    store: &mut EntityStore,
    rng: &mut ChaChaRng,
    upgrades: &UpgradeLevels,
    tick: u64,
    events: &mut Vec<GameEvent>,
) {
    let mut shots: Vec<FireParams> = Vec::new();
    let mut escort_spawns: Vec<Vec2> = Vec::new();

    for i in 0..store.enemies.len() {
        let enemy = &mut store.enemies[i];
        match enemy.kind {
            EnemyKind::PlaneSmall | EnemyKind::PlaneLarge => advance_plane(enemy, tick),
            EnemyKind::ShipSmall | EnemyKind::ShipMedium => advance_ship(enemy, tick),
            EnemyKind::Boss => advance_boss(enemy),
        }

        match enemy.kind {
            EnemyKind::PlaneSmall => small_plane_attack(enemy, rng, &mut shots),
            EnemyKind::PlaneLarge => large_plane_attack(enemy, rng, &mut shots),
            EnemyKind::ShipSmall | EnemyKind::ShipMedium => ship_attack(enemy, &mut shots),
            EnemyKind::Boss => boss_attack(enemy, &mut shots, &mut escort_spawns),
        }
    }

    for pos in escort_spawns {
        spawn_escort(store, rng, pos);
    }
    for params in shots {
        weapons::fire(store, rng, upgrades, events, tick, params);
    }
}

/// Pick the 180° turn direction that curves toward the screen center.
fn turn_toward_center(x: f32) -> f32 {
    if x < config::FIELD_WIDTH * 0.5 {
        1.0
    } else {
        -1.0
    }
}

fn fly_heading(body: &mut Body, speed: f32) {
    body.vel = Vec2::from_angle(body.rotation) * speed;
    body.pos += body.vel;
}

/// Facing "up" within tolerance. Clockwise turners pass through 3π/2 rather
/// than -π/2, so both representations count.
fn facing_up(rotation: f32, tolerance: f32, direction: f32) -> bool {
    (rotation + FRAC_PI_2).abs() < tolerance
        || (direction > 0.0 && rotation > 3.0 * FRAC_PI_2)
}

fn facing_down(rotation: f32, tolerance: f32) -> bool {
    (rotation - FRAC_PI_2).abs() < tolerance
}

/// Both plane kinds fly the same race-track loop with different tuning:
/// descend, 180° turn toward center, climb out, turn back in.
fn advance_plane(enemy: &mut Enemy, tick: u64) {
    let EnemyState::Flight(state) = enemy.state else {
        return;
    };
    let (speed, turn_rate, tolerance, dive_limit) = match enemy.kind {
        EnemyKind::PlaneSmall => (
            config::SMALL_PLANE_SPEED,
            config::SMALL_PLANE_TURN_RATE,
            config::SMALL_PLANE_TURN_TOLERANCE,
            config::SMALL_PLANE_TURN_UP_Y,
        ),
        _ => (
            config::LARGE_PLANE_SPEED,
            config::LARGE_PLANE_TURN_RATE,
            config::LARGE_PLANE_TURN_TOLERANCE,
            config::LARGE_PLANE_TURN_UP_Y,
        ),
    };

    match state {
        FlightState::Approach => {
            enemy.body.pos.y += speed;
            if enemy.kind == EnemyKind::PlaneSmall {
                let phase = tick as f32 * config::SMALL_PLANE_WOBBLE_FREQ + enemy.wobble_seed;
                enemy.body.pos.x += phase.sin() * config::SMALL_PLANE_WOBBLE_AMP;
                enemy.body.rotation = FRAC_PI_2 + phase.cos() * config::SMALL_PLANE_TILT_AMP;
            } else {
                enemy.body.rotation = FRAC_PI_2;
            }
            if enemy.body.pos.y > dive_limit {
                enemy.state = EnemyState::Flight(FlightState::TurnUp {
                    direction: turn_toward_center(enemy.body.pos.x),
                });
            }
        }
        FlightState::TurnUp { direction } => {
            enemy.body.rotation += turn_rate * direction;
            fly_heading(&mut enemy.body, speed);
            if facing_up(enemy.body.rotation, tolerance, direction) {
                enemy.body.rotation = -FRAC_PI_2;
                enemy.state = EnemyState::Flight(FlightState::Retreat);
            }
        }
        FlightState::Retreat => {
            enemy.body.pos.y -= speed;
            enemy.body.rotation = -FRAC_PI_2;
            if enemy.body.pos.y < config::PLANE_RETREAT_TOP_Y {
                enemy.state = EnemyState::Flight(FlightState::TurnDown {
                    direction: turn_toward_center(enemy.body.pos.x),
                });
            }
        }
        FlightState::TurnDown { direction } => {
            enemy.body.rotation += turn_rate * direction;
            fly_heading(&mut enemy.body, speed);
            if facing_down(enemy.body.rotation, tolerance)
                || enemy.body.pos.y > config::PLANE_TURN_DOWN_EXIT_Y
            {
                enemy.body.rotation = FRAC_PI_2;
                enemy.state = EnemyState::Flight(FlightState::Approach);
            }
        }
    }
}

fn advance_ship(enemy: &mut Enemy, tick: u64) {
    enemy.body.pos.y += config::SHIP_DRIFT_SPEED;
    if enemy.body.pos.y > config::SHIP_HOLD_DEPTH {
        enemy.body.pos.y -= config::SHIP_DRIFT_SPEED;
    }
    enemy.body.pos.x += (tick as f32 * config::SHIP_SWAY_FREQ).sin() * config::SHIP_SWAY_AMP;
}

fn advance_boss(enemy: &mut Enemy) {
    if enemy.body.pos.y < config::BOSS_HOLD_Y {
        enemy.body.pos.y += config::BOSS_DESCENT_SPEED;
    }
}

fn small_plane_attack(enemy: &mut Enemy, rng: &mut ChaChaRng, shots: &mut Vec<FireParams>) {
    let carrier = config::CARRIER_CENTER;
    enemy.attack_cooldown += 1;

    let in_range = enemy.body.pos.distance(carrier) < config::SMALL_PLANE_ATTACK_RANGE
        && enemy.body.pos.y < carrier.y;
    if enemy.attack_cooldown > config::PLANE_ATTACK_COOLDOWN && in_range && enemy.burst.is_none() {
        enemy.burst = Some(Burst {
            remaining: config::PLANE_BURST_COUNT,
            timer: 0,
        });
        enemy.attack_cooldown = 0;
    }

    let mut finished = false;
    if let Some(burst) = &mut enemy.burst {
        burst.timer += 1;
        if burst.timer > config::SMALL_PLANE_BURST_SPACING {
            burst.timer = 0;
            burst.remaining -= 1;
            // Miss-by-design: the aim point goes wide, not the physics.
            let aim = if rng.gen::<f32>() < enemy.hit_chance {
                carrier
            } else {
                carrier
                    + Vec2::new(
                        (rng.gen::<f32>() - 0.5) * config::SMALL_PLANE_MISS_SPREAD,
                        (rng.gen::<f32>() - 0.5) * config::SMALL_PLANE_MISS_SPREAD,
                    )
            };
            shots.push(FireParams {
                origin: enemy.body.pos,
                heading: enemy.body.rotation,
                target: Some(AimTarget {
                    pos: aim,
                    entity: None,
                }),
                kind: ProjectileKind::Bullet,
                owner: Owner::Enemy,
                damage: enemy.damage,
            });
            finished = burst.remaining == 0;
        }
    }
    if finished {
        enemy.burst = None;
    }
}

fn large_plane_attack(enemy: &mut Enemy, rng: &mut ChaChaRng, shots: &mut Vec<FireParams>) {
    let carrier = config::CARRIER_CENTER;

    // The bombing run only arms on the approach leg, inside a vertical band
    // that covers the run-in and the fly-over.
    let on_approach = matches!(enemy.state, EnemyState::Flight(FlightState::Approach));
    let y = enemy.body.pos.y;
    if on_approach
        && y > carrier.y - config::BOMB_RUN_BAND_ABOVE
        && y < carrier.y + config::BOMB_RUN_BAND_BELOW
    {
        enemy.attack_cooldown += 1;
        if enemy.attack_cooldown > config::PLANE_ATTACK_COOLDOWN && enemy.burst.is_none() {
            enemy.burst = Some(Burst {
                remaining: config::PLANE_BURST_COUNT,
                timer: 0,
            });
            enemy.attack_cooldown = 0;
        }
    }

    let mut finished = false;
    if let Some(burst) = &mut enemy.burst {
        burst.timer += 1;
        if burst.timer > config::LARGE_PLANE_BURST_SPACING {
            burst.timer = 0;
            burst.remaining -= 1;
            // The bomb hit roll is a fixed constant, independent of the
            // profile's hit_chance (see DESIGN.md).
            let aim = if rng.gen::<f32>() < config::LARGE_PLANE_BOMB_HIT_CHANCE {
                carrier
                    + Vec2::new(
                        (rng.gen::<f32>() - 0.5) * config::BOMB_DECK_JITTER_X,
                        (rng.gen::<f32>() - 0.5) * config::BOMB_DECK_JITTER_Y,
                    )
            } else {
                let offset =
                    config::BOMB_MISS_OFFSET_MIN + rng.gen::<f32>() * config::BOMB_MISS_OFFSET_SPREAD;
                let side = if rng.gen::<bool>() { 1.0 } else { -1.0 };
                carrier
                    + Vec2::new(
                        offset * side,
                        (rng.gen::<f32>() - 0.5) * config::BOMB_MISS_JITTER_Y,
                    )
            };
            shots.push(FireParams {
                origin: enemy.body.pos,
                heading: enemy.body.rotation,
                target: Some(AimTarget {
                    pos: aim,
                    entity: None,
                }),
                kind: ProjectileKind::Bomb,
                owner: Owner::Enemy,
                damage: enemy.damage,
            });
            finished = burst.remaining == 0;
        }
    }
    if finished {
        enemy.burst = None;
    }
}

fn ship_attack(enemy: &mut Enemy, shots: &mut Vec<FireParams>) {
    enemy.attack_cooldown += 1;
    if enemy.attack_cooldown > config::SHIP_FIRE_INTERVAL {
        let kind = if enemy.kind == EnemyKind::ShipSmall {
            ProjectileKind::Bullet
        } else {
            ProjectileKind::Cannon
        };
        shots.push(FireParams {
            origin: enemy.body.pos,
            heading: enemy.body.rotation,
            target: Some(AimTarget {
                pos: config::CARRIER_CENTER,
                entity: None,
            }),
            kind,
            owner: Owner::Enemy,
            damage: enemy.damage,
        });
        enemy.attack_cooldown = 0;
    }
}

fn boss_attack(enemy: &mut Enemy, shots: &mut Vec<FireParams>, escort_spawns: &mut Vec<Vec2>) {
    enemy.attack_cooldown += 1;
    if enemy.attack_cooldown <= config::BOSS_FIRE_INTERVAL {
        return;
    }
    let pos = enemy.body.pos;
    let EnemyState::Boss { attack_phase } = &mut enemy.state else {
        return;
    };

    // Strict round-robin; the index advances on every trigger regardless of
    // which phase executed.
    match *attack_phase % 3 {
        0 => {
            for dx in [-config::BOSS_CANNON_OFFSET, config::BOSS_CANNON_OFFSET] {
                shots.push(FireParams {
                    origin: pos + Vec2::new(dx, 0.0),
                    heading: FRAC_PI_2,
                    target: Some(AimTarget {
                        pos: config::CARRIER_CENTER,
                        entity: None,
                    }),
                    kind: ProjectileKind::Cannon,
                    owner: Owner::Enemy,
                    damage: config::BOSS_CANNON_DAMAGE,
                });
            }
        }
        1 => {
            for _ in 0..2 {
                shots.push(FireParams {
                    origin: pos,
                    heading: FRAC_PI_2,
                    target: Some(AimTarget {
                        pos: config::CARRIER_CENTER,
                        entity: None,
                    }),
                    kind: ProjectileKind::Rocket,
                    owner: Owner::Enemy,
                    damage: config::BOSS_ROCKET_DAMAGE,
                });
            }
        }
        _ => escort_spawns.push(pos),
    }
    *attack_phase += 1;
    enemy.attack_cooldown = 0;
}

/// Boss escorts are unscaled small planes worth nothing: reinforcements,
/// not wave members.
fn spawn_escort(store: &mut EntityStore, rng: &mut ChaChaRng, pos: Vec2) {
    let profile = config::enemy_profile(EnemyKind::PlaneSmall);
    let id = store.ids.allocate();
    store.enemies.push(Enemy {
        id,
        kind: EnemyKind::PlaneSmall,
        body: Body::new(
            pos,
            Vec2::new(profile.width, profile.height),
            profile.hp,
            FRAC_PI_2,
        ),
        damage: 1.0,
        hit_chance: profile.hit_chance,
        score_value: 0.0,
        money_value: 0.0,
        attack_cooldown: 0,
        burst: None,
        state: EnemyState::Flight(FlightState::Approach),
        wobble_seed: rng.gen_range(0.0..TAU),
        destroyed: false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_enemy(kind: EnemyKind, pos: Vec2, state: EnemyState) -> Enemy {
        let profile = config::enemy_profile(kind);
        Enemy {
            id: crate::entities::EntityId(0),
            kind,
            body: Body::new(
                pos,
                Vec2::new(profile.width, profile.height),
                profile.hp,
                FRAC_PI_2,
            ),
            damage: profile.damage,
            hit_chance: profile.hit_chance,
            score_value: profile.score_value,
            money_value: profile.money_value,
            attack_cooldown: 0,
            burst: None,
            state,
            wobble_seed: 0.0,
            destroyed: false,
        }
    }

    #[test]
    fn small_plane_turns_up_at_the_depth_threshold() {
        let mut plane = test_enemy(
            EnemyKind::PlaneSmall,
            Vec2::new(200.0, config::SMALL_PLANE_TURN_UP_Y - 1.0),
            EnemyState::Flight(FlightState::Approach),
        );
        advance_plane(&mut plane, 0);
        // Left-half planes turn clockwise, toward the screen center.
        assert!(matches!(
            plane.state,
            EnemyState::Flight(FlightState::TurnUp { direction }) if direction > 0.0
        ));
    }

    #[test]
    fn retreating_plane_turns_back_down_near_the_top() {
        let mut plane = test_enemy(
            EnemyKind::PlaneSmall,
            Vec2::new(600.0, config::PLANE_RETREAT_TOP_Y + 2.0),
            EnemyState::Flight(FlightState::Retreat),
        );
        advance_plane(&mut plane, 0);
        assert!(matches!(
            plane.state,
            EnemyState::Flight(FlightState::TurnDown { direction }) if direction < 0.0
        ));
    }

    #[test]
    fn ships_hold_their_station_depth() {
        let mut ship = test_enemy(
            EnemyKind::ShipSmall,
            Vec2::new(400.0, config::SHIP_HOLD_DEPTH + 1.0),
            EnemyState::Station,
        );
        let before = ship.body.pos.y;
        for tick in 0..100 {
            advance_ship(&mut ship, tick);
        }
        assert!((ship.body.pos.y - before).abs() < 1e-3);
    }

    #[test]
    fn boss_cycles_attack_phases_round_robin() {
        let mut boss = test_enemy(
            EnemyKind::Boss,
            Vec2::new(400.0, config::BOSS_HOLD_Y),
            EnemyState::Boss { attack_phase: 0 },
        );
        let mut shots = Vec::new();
        let mut escorts = Vec::new();

        for expected_phase in 0..3u32 {
            boss.attack_cooldown = config::BOSS_FIRE_INTERVAL + 1;
            assert!(matches!(
                boss.state,
                EnemyState::Boss { attack_phase } if attack_phase == expected_phase
            ));
            boss_attack(&mut boss, &mut shots, &mut escorts);
            assert_eq!(boss.attack_cooldown, 0);
        }

        // Phase 0 fired twin cannons, phase 1 twin rockets, phase 2 spawned
        // one escort.
        assert_eq!(
            shots
                .iter()
                .filter(|s| s.kind == ProjectileKind::Cannon)
                .count(),
            2
        );
        assert_eq!(
            shots
                .iter()
                .filter(|s| s.kind == ProjectileKind::Rocket)
                .count(),
            2
        );
        assert_eq!(escorts.len(), 1);
        assert!(matches!(boss.state, EnemyState::Boss { attack_phase: 3 }));
    }

    #[test]
    fn ship_fire_interval_gates_the_cannon() {
        let mut ship = test_enemy(
            EnemyKind::ShipMedium,
            Vec2::new(400.0, config::SHIP_HOLD_DEPTH),
            EnemyState::Station,
        );
        let mut shots = Vec::new();
        for _ in 0..config::SHIP_FIRE_INTERVAL {
            ship_attack(&mut ship, &mut shots);
        }
        assert!(shots.is_empty());
        ship_attack(&mut ship, &mut shots);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].kind, ProjectileKind::Cannon);
        assert_eq!(ship.attack_cooldown, 0);
    }
}
