use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

use flattop::engine::config;
use flattop::entities::enemy::{Enemy, EnemyKind, EnemyState, FlightState};
use flattop::entities::projectile::{Owner, Projectile, ProjectileKind, TargetAffinity};
use flattop::entities::Body;
use flattop::events::game_events::{GameEvent, SplashSize};
use flattop::state::skills::SkillKind;
use flattop::{RunPhase, Simulation};

fn push_enemy(sim: &mut Simulation, kind: EnemyKind, pos: Vec2, hp: f32) -> flattop::entities::EntityId {
    let profile = config::enemy_profile(kind);
    let id = sim.store.ids.allocate();
    let body = Body::new(pos, Vec2::new(profile.width, profile.height), hp, FRAC_PI_2);
    let state = if kind.is_airborne() {
        EnemyState::Flight(FlightState::Approach)
    } else {
        EnemyState::Station
    };
    sim.store.enemies.push(Enemy {
        id,
        kind,
        body,
        damage: profile.damage,
        hit_chance: profile.hit_chance,
        score_value: profile.score_value,
        money_value: profile.money_value,
        attack_cooldown: 0,
        burst: None,
        state,
        wobble_seed: 0.0,
        destroyed: false,
    });
    id
}

fn push_projectile(
    sim: &mut Simulation,
    kind: ProjectileKind,
    owner: Owner,
    affinity: TargetAffinity,
    pos: Vec2,
    vel: Vec2,
    damage: f32,
) -> flattop::entities::EntityId {
    let id = sim.store.ids.allocate();
    let mut body = Body::new(pos, config::projectile_size(kind), 1.0, 0.0);
    body.vel = vel;
    sim.store.projectiles.push(Projectile {
        id,
        kind,
        body,
        damage,
        owner,
        affinity,
        homing_target: None,
        max_travel: None,
        traveled: 0.0,
    });
    id
}

fn fresh_sim() -> Simulation {
    let mut sim = Simulation::new_with_seed(1);
    sim.start_run();
    // Keep the wave director from trickling in its own enemies.
    sim.wave.remaining_to_spawn = 0;
    sim
}

#[test]
fn three_simultaneous_hits_kill_once_and_award_once() {
    let mut sim = fresh_sim();
    let pos = Vec2::new(200.0, 300.0);
    push_enemy(&mut sim, EnemyKind::PlaneSmall, pos, 10.0);
    for _ in 0..3 {
        push_projectile(
            &mut sim,
            ProjectileKind::Bullet,
            Owner::Player,
            TargetAffinity::Air,
            pos,
            Vec2::ZERO,
            5.0,
        );
    }

    sim.tick();

    // All three projectiles connected; the kill resolved exactly once.
    assert!(sim.store.enemies.is_empty());
    assert!(sim.store.projectiles.is_empty());
    let events = sim.drain_events();
    let kills = events
        .iter()
        .filter(|e| matches!(e, GameEvent::EnemyDestroyed(_)))
        .count();
    assert_eq!(kills, 1);
    assert!((sim.stats.xp - 10.0).abs() < 1e-4);
    assert!((sim.stats.money - 5.0).abs() < 1e-4);
}

#[test]
fn affinity_gates_collisions() {
    let mut sim = fresh_sim();
    let pos = Vec2::new(600.0, 300.0);
    let ship = push_enemy(&mut sim, EnemyKind::ShipSmall, pos, 200.0);
    // An air-only bullet sitting inside the ship's hit circle.
    push_projectile(
        &mut sim,
        ProjectileKind::Bullet,
        Owner::Player,
        TargetAffinity::Air,
        pos,
        Vec2::ZERO,
        5.0,
    );

    sim.tick();

    let ship = sim.store.enemy(ship).expect("ship still alive");
    assert_eq!(ship.body.hp, ship.body.max_hp, "air rounds cannot hit a hull");
    assert_eq!(sim.store.projectiles.len(), 1, "the bullet flies on");
}

#[test]
fn enemy_round_chips_carrier_hp_without_game_over() {
    let mut sim = fresh_sim();
    push_projectile(
        &mut sim,
        ProjectileKind::Bullet,
        Owner::Enemy,
        TargetAffinity::Water,
        config::CARRIER_CENTER,
        Vec2::ZERO,
        0.2,
    );

    sim.tick();

    assert!((sim.stats.hp - 99.8).abs() < 1e-3);
    assert_eq!(sim.phase, RunPhase::Playing);
    assert!(!sim
        .drain_events()
        .iter()
        .any(|e| matches!(e, GameEvent::GameOver(_))));
}

#[test]
fn lethal_hits_trigger_game_over_exactly_once() {
    let mut sim = fresh_sim();
    sim.stats.hp = 0.4;
    for _ in 0..2 {
        push_projectile(
            &mut sim,
            ProjectileKind::Bullet,
            Owner::Enemy,
            TargetAffinity::Water,
            config::CARRIER_CENTER,
            Vec2::ZERO,
            1.0,
        );
    }

    sim.tick();

    assert_eq!(sim.phase, RunPhase::GameOver);
    assert_eq!(sim.stats.hp, 0.0);
    let events = sim.drain_events();
    let game_overs = events
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver(_)))
        .count();
    assert_eq!(game_overs, 1);

    // Clock stopped: further ticks change nothing.
    let tick_before = sim.tick;
    sim.tick();
    assert_eq!(sim.tick, tick_before);
}

#[test]
fn xp_overflow_levels_up_and_suspends_the_clock() {
    let mut sim = fresh_sim();
    sim.stats.xp = 95.0;
    let pos = Vec2::new(200.0, 300.0);
    push_enemy(&mut sim, EnemyKind::PlaneSmall, pos, 5.0);
    push_projectile(
        &mut sim,
        ProjectileKind::Bullet,
        Owner::Player,
        TargetAffinity::Air,
        pos,
        Vec2::ZERO,
        5.0,
    );

    sim.tick();

    assert!((sim.stats.xp - 5.0).abs() < 1e-3);
    assert!((sim.stats.max_xp - 150.0).abs() < 1e-3);
    assert_eq!(sim.stats.level, 2);
    assert_eq!(sim.phase, RunPhase::LevelUp);
    assert_eq!(sim.reward_options.len(), config::LEVEL_UP_CHOICES);

    // Suspended: ticks are not delivered while the pick is pending.
    let tick_before = sim.tick;
    sim.tick();
    assert_eq!(sim.tick, tick_before);

    // An unoffered skill is rejected; the offered one resumes play.
    let not_offered = SkillKind::ALL
        .into_iter()
        .find(|k| !sim.reward_options.contains(k))
        .unwrap();
    assert!(sim.pick_reward(not_offered).is_err());

    let choice = sim.reward_options[0];
    sim.pick_reward(choice).unwrap();
    assert_eq!(sim.skills.level(choice), 1);
    assert_eq!(sim.phase, RunPhase::Playing);
    assert!(sim.reward_options.is_empty());
}

#[test]
fn travel_budget_detonates_within_one_tick() {
    let mut sim = fresh_sim();
    let id = push_projectile(
        &mut sim,
        ProjectileKind::Cannon,
        Owner::Player,
        TargetAffinity::Water,
        Vec2::new(300.0, 300.0),
        Vec2::new(config::PROJECTILE_SPEED, 0.0),
        10.0,
    );
    sim.store
        .projectiles
        .iter_mut()
        .find(|p| p.id == id)
        .unwrap()
        .max_travel = Some(10.0);

    sim.tick();
    assert_eq!(sim.store.projectiles.len(), 1, "6 of 10 units traveled");
    sim.drain_events();

    sim.tick();
    assert!(sim.store.projectiles.is_empty(), "12 of 10 units traveled");
    let events = sim.drain_events();
    assert!(events.iter().any(
        |e| matches!(e, GameEvent::Splash(s) if s.size == SplashSize::Large)
    ));
}

#[test]
fn rockets_home_while_the_target_lives_then_fly_straight() {
    let mut sim = fresh_sim();
    let ship_pos = Vec2::new(600.0, 300.0);
    let ship = push_enemy(&mut sim, EnemyKind::ShipMedium, ship_pos, 600.0);
    let rocket = push_projectile(
        &mut sim,
        ProjectileKind::Rocket,
        Owner::Player,
        TargetAffinity::Both,
        Vec2::new(100.0, 300.0),
        Vec2::new(config::ROCKET_LAUNCH_SPEED, 0.0),
        200.0,
    );
    sim.store
        .projectiles
        .iter_mut()
        .find(|p| p.id == rocket)
        .unwrap()
        .homing_target = Some(ship);

    sim.tick();
    let vel = sim
        .store
        .projectiles
        .iter()
        .find(|p| p.id == rocket)
        .unwrap()
        .body
        .vel;
    assert!((vel.length() - config::ROCKET_HOMING_SPEED).abs() < 1e-3);
    assert!(vel.x > 0.0, "correcting toward the ship");

    // Target dies: the rocket keeps its last heading.
    sim.store.enemies.clear();
    sim.tick();
    let after = sim
        .store
        .projectiles
        .iter()
        .find(|p| p.id == rocket)
        .unwrap()
        .body
        .vel;
    assert_eq!(vel, after);
}

#[test]
fn damage_points_accumulate_on_wounded_planes() {
    let mut sim = fresh_sim();
    let pos = Vec2::new(200.0, 300.0);
    let plane = push_enemy(&mut sim, EnemyKind::PlaneLarge, pos, 100.0);

    // Pepper the hull over several ticks; the plane survives on high hp.
    for _ in 0..20 {
        let current = sim.store.enemy(plane).map(|e| e.body.pos);
        let Some(current) = current else { break };
        push_projectile(
            &mut sim,
            ProjectileKind::Bullet,
            Owner::Player,
            TargetAffinity::Air,
            current,
            Vec2::ZERO,
            1.0,
        );
        sim.tick();
    }

    let plane = sim.store.enemy(plane).expect("plane survives the peppering");
    assert!(plane.body.hp < plane.body.max_hp);
    assert!(
        !plane.body.damage_points.is_empty(),
        "20 hits at 40% odds should anchor at least one fire"
    );
    assert!(plane.body.damage_points.len() <= 3);
}
