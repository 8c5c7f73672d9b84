use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

use flattop::engine::config;
use flattop::entities::enemy::{Enemy, EnemyKind, EnemyState};
use flattop::entities::friendly::{FriendlyKind, FriendlyState, FriendlyUnit};
use flattop::entities::projectile::ProjectileKind;
use flattop::entities::Body;
use flattop::Simulation;

fn push_fighter(sim: &mut Simulation, pos: Vec2, state: FriendlyState, ammo: u32) {
    let id = sim.store.ids.allocate();
    sim.store.friendlies.push(FriendlyUnit {
        id,
        kind: FriendlyKind::Fighter,
        body: Body::new(pos, config::FIGHTER_SIZE, config::FRIENDLY_MAX_HP, -FRAC_PI_2),
        ammo,
        max_ammo: config::FIGHTER_MAX_AMMO,
        state,
    });
}

fn push_bomber(sim: &mut Simulation, pos: Vec2, state: FriendlyState, ammo: u32) {
    let id = sim.store.ids.allocate();
    sim.store.friendlies.push(FriendlyUnit {
        id,
        kind: FriendlyKind::Bomber,
        body: Body::new(pos, config::BOMBER_SIZE, config::FRIENDLY_MAX_HP, -FRAC_PI_2),
        ammo,
        max_ammo: config::BOMBER_MAX_AMMO,
        state,
    });
}

fn push_ship(sim: &mut Simulation, pos: Vec2) {
    let profile = config::enemy_profile(EnemyKind::ShipSmall);
    let id = sim.store.ids.allocate();
    sim.store.enemies.push(Enemy {
        id,
        kind: EnemyKind::ShipSmall,
        body: Body::new(pos, Vec2::new(profile.width, profile.height), profile.hp, FRAC_PI_2),
        damage: profile.damage,
        hit_chance: profile.hit_chance,
        score_value: profile.score_value,
        money_value: profile.money_value,
        attack_cooldown: 0,
        burst: None,
        state: EnemyState::Station,
        wobble_seed: 0.0,
        destroyed: false,
    });
}

fn fresh_sim() -> Simulation {
    let mut sim = Simulation::new_with_seed(5);
    sim.start_run();
    sim.wave.remaining_to_spawn = 0;
    sim
}

#[test]
fn fighter_squadron_respects_the_skill_cap() {
    let mut sim = Simulation::new_with_seed(5);
    sim.start_run();
    sim.skills.fighter = 1;
    // Keep incidental kills from pausing the clock for a reward pick.
    sim.stats.max_xp = f32::INFINITY;

    for _ in 0..3 * (config::FIGHTER_SPAWN_INTERVAL + 1) {
        sim.tick();
        assert!(sim.store.friendly_count(FriendlyKind::Fighter) <= 2);
    }
    assert_eq!(sim.store.friendly_count(FriendlyKind::Fighter), 2);
    assert_eq!(sim.store.friendly_count(FriendlyKind::Bomber), 0);
}

#[test]
fn no_units_spawn_without_the_skill() {
    let mut sim = fresh_sim();
    for _ in 0..2 * (config::BOMBER_SPAWN_INTERVAL + 1) {
        sim.tick();
    }
    assert!(sim.store.friendlies.is_empty());
}

#[test]
fn ammo_exhaustion_forces_return() {
    let mut sim = fresh_sim();
    push_fighter(
        &mut sim,
        Vec2::new(400.0, 400.0),
        FriendlyState::Airborne { drop_timer: 0 },
        0,
    );

    sim.tick();

    assert!(matches!(
        sim.store.friendlies[0].state,
        FriendlyState::Returning
    ));
}

#[test]
fn rearming_restores_the_airframe() {
    let mut sim = fresh_sim();
    let park = Vec2::new(
        config::CARRIER_CENTER.x,
        config::CARRIER_CENTER.y + config::PARK_FIRST_OFFSET_Y,
    );
    push_fighter(&mut sim, park, FriendlyState::Rearming { timer: 1 }, 0);
    sim.store.friendlies[0].body.hp = 40.0;
    sim.store.friendlies[0]
        .body
        .damage_points
        .push(Vec2::new(5.0, 5.0));

    sim.tick();
    sim.tick();

    let unit = &sim.store.friendlies[0];
    assert!(matches!(unit.state, FriendlyState::Launching));
    assert_eq!(unit.ammo, config::FIGHTER_MAX_AMMO);
    assert_eq!(unit.body.hp, unit.body.max_hp);
    assert!(unit.body.damage_points.is_empty());
}

#[test]
fn bomber_drops_on_close_approach_and_cools_down() {
    let mut sim = fresh_sim();
    let ship_pos = Vec2::new(400.0, 300.0);
    push_ship(&mut sim, ship_pos);
    push_bomber(
        &mut sim,
        ship_pos + Vec2::new(0.0, 10.0),
        FriendlyState::Airborne { drop_timer: 0 },
        config::BOMBER_MAX_AMMO,
    );

    sim.tick();

    let unit = &sim.store.friendlies[0];
    assert_eq!(unit.ammo, config::BOMBER_MAX_AMMO - 1);
    assert!(matches!(
        unit.state,
        FriendlyState::Airborne {
            drop_timer: config::BOMBER_DROP_COOLDOWN
        }
    ));
    assert!(sim
        .store
        .projectiles
        .iter()
        .any(|p| p.kind == ProjectileKind::Bomb));
}

#[test]
fn launching_unit_goes_airborne_past_the_deck() {
    let mut sim = fresh_sim();
    push_fighter(
        &mut sim,
        config::CARRIER_CENTER,
        FriendlyState::Launching,
        config::FIGHTER_MAX_AMMO,
    );
    sim.store.friendlies[0].body.vel = Vec2::new(0.0, -config::FIGHTER_LAUNCH_SPEED);

    for _ in 0..60 {
        sim.tick();
        if matches!(sim.store.friendlies[0].state, FriendlyState::Airborne { .. }) {
            break;
        }
    }

    let unit = &sim.store.friendlies[0];
    assert!(matches!(unit.state, FriendlyState::Airborne { .. }));
    assert!(unit.body.pos.y < config::CARRIER_CENTER.y - config::LAUNCH_EXIT_OFFSET);
}

#[test]
fn fighter_without_targets_patrols_upward() {
    let mut sim = fresh_sim();
    push_fighter(
        &mut sim,
        Vec2::new(400.0, 400.0),
        FriendlyState::Airborne { drop_timer: 0 },
        config::FIGHTER_MAX_AMMO,
    );

    sim.tick();
    assert!(
        sim.store.friendlies[0].body.pos.y < 400.0,
        "empty sky means patrol climb"
    );
}
