use glam::Vec2;

use crate::entities::enemy::EnemyKind;
use crate::entities::projectile::ProjectileKind;

/// Fixed timestep: 60 Hz
pub const TICK_RATE: f32 = 60.0;

/// Playfield dimensions in world units
pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 900.0;

/// The carrier sits on the runway centerline near the bottom of the field.
pub const CARRIER_CENTER: Vec2 = Vec2::new(FIELD_WIDTH * 0.5, FIELD_HEIGHT - 100.0);
/// Carrier collision box half-extents (enemy projectiles test against this).
pub const CARRIER_HALF_WIDTH: f32 = 40.0;
pub const CARRIER_HALF_HEIGHT: f32 = 100.0;

/// Out-of-bounds margin for enemy cleanup
pub const OOB_MARGIN: f32 = 200.0;
/// Projectiles despawn this far above the top edge (enemies enter from above it)
pub const PROJECTILE_TOP_MARGIN: f32 = 100.0;

// --- Waves ---

pub const BOSS_WAVE: u32 = 20;
/// Enemy HP and damage scale by +10% per wave (boss exempt)
pub const ENEMY_HP_SCALE: f32 = 1.10;
pub const ENEMY_DMG_SCALE: f32 = 1.10;
/// Wave size: floor(WAVE_SIZE_BASE + WAVE_SIZE_PER_WAVE * wave)
pub const WAVE_SIZE_BASE: f32 = 10.0;
pub const WAVE_SIZE_PER_WAVE: f32 = 1.5;
/// Ticks between spawns once a wave is running
pub const SPAWN_INTERVAL_TICKS: u32 = 30;
/// Delay before the first spawn of each wave
pub const FIRST_SPAWN_DELAY_TICKS: u32 = 60;
/// Live-enemy concurrency cap; spawning stalls above this
pub const LIVE_ENEMY_CAP: usize = 20;
/// A chosen ship spawn downgrades to a small plane above this many live ships
pub const SHIP_BLOCKADE_LIMIT: usize = 6;
/// Nested spawn-draw thresholds: first matching threshold wins
pub const LARGE_PLANE_THRESHOLD: f32 = 0.20;
pub const SMALL_SHIP_THRESHOLD: f32 = 0.30;
pub const MEDIUM_SHIP_THRESHOLD: f32 = 0.35;
pub const LARGE_PLANE_MIN_WAVE: u32 = 2;
pub const SMALL_SHIP_MIN_WAVE: u32 = 4;
pub const MEDIUM_SHIP_MIN_WAVE: u32 = 8;
/// Horizontal spawn inset from either field edge
pub const SPAWN_EDGE_INSET: f32 = 50.0;

// --- Enemy flight state machines ---

pub const SMALL_PLANE_SPEED: f32 = 4.0;
pub const SMALL_PLANE_TURN_RATE: f32 = 0.05;
pub const SMALL_PLANE_TURN_TOLERANCE: f32 = 0.2;
/// Small planes begin their 180° turn at this depth
pub const SMALL_PLANE_TURN_UP_Y: f32 = FIELD_HEIGHT - 150.0;
pub const SMALL_PLANE_WOBBLE_FREQ: f32 = 0.05;
pub const SMALL_PLANE_WOBBLE_AMP: f32 = 1.0;
pub const SMALL_PLANE_TILT_AMP: f32 = 0.1;

pub const LARGE_PLANE_SPEED: f32 = 1.0;
pub const LARGE_PLANE_TURN_RATE: f32 = 0.015;
pub const LARGE_PLANE_TURN_TOLERANCE: f32 = 0.1;
/// Large planes fly past the bottom edge before turning
pub const LARGE_PLANE_TURN_UP_Y: f32 = FIELD_HEIGHT;

/// Planes climb back to this height before turning down again
pub const PLANE_RETREAT_TOP_Y: f32 = 100.0;
/// Depth fallback that ends a downward turn regardless of heading
pub const PLANE_TURN_DOWN_EXIT_Y: f32 = 110.0;

// --- Enemy attacks ---

pub const PLANE_ATTACK_COOLDOWN: u32 = 120;
pub const PLANE_BURST_COUNT: u32 = 3;
pub const SMALL_PLANE_BURST_SPACING: u32 = 10;
pub const LARGE_PLANE_BURST_SPACING: u32 = 15;
/// Small planes only open fire inside this range while above the carrier
pub const SMALL_PLANE_ATTACK_RANGE: f32 = 400.0;
/// Missed small-plane shots land inside this square around the carrier
pub const SMALL_PLANE_MISS_SPREAD: f32 = 200.0;

/// Large-plane bombing runs trigger inside this vertical band around the carrier
pub const BOMB_RUN_BAND_ABOVE: f32 = 400.0;
pub const BOMB_RUN_BAND_BELOW: f32 = 100.0;
/// Hardcoded bomb hit probability, intentionally independent of the
/// spawn profile's hit_chance field (see DESIGN.md).
pub const LARGE_PLANE_BOMB_HIT_CHANCE: f32 = 0.1;
/// Deck jitter for bombs that do hit
pub const BOMB_DECK_JITTER_X: f32 = 40.0;
pub const BOMB_DECK_JITTER_Y: f32 = 100.0;
/// Missed bombs land beside the carrier in open water
pub const BOMB_MISS_OFFSET_MIN: f32 = 90.0;
pub const BOMB_MISS_OFFSET_SPREAD: f32 = 80.0;
pub const BOMB_MISS_JITTER_Y: f32 = 200.0;

pub const SHIP_FIRE_INTERVAL: u32 = 180;
pub const SHIP_DRIFT_SPEED: f32 = 0.3;
/// Ships hold station at this depth
pub const SHIP_HOLD_DEPTH: f32 = FIELD_HEIGHT - 300.0;
pub const SHIP_SWAY_FREQ: f32 = 0.01;
pub const SHIP_SWAY_AMP: f32 = 0.5;

pub const BOSS_FIRE_INTERVAL: u32 = 240;
pub const BOSS_DESCENT_SPEED: f32 = 0.5;
pub const BOSS_HOLD_Y: f32 = 150.0;
/// Twin cannon mounts sit this far either side of the boss centerline
pub const BOSS_CANNON_OFFSET: f32 = 40.0;
pub const BOSS_CANNON_DAMAGE: f32 = 5.0;
pub const BOSS_ROCKET_DAMAGE: f32 = 5.0;

// --- Carrier and escort weapons ---

pub const MEDIUM_GUN_INTERVAL: i32 = 60;
pub const MEDIUM_GUN_DAMAGE: f32 = 10.0;
pub const MEDIUM_GUN_VOLLEYS: u32 = 3;
/// Staggered volley spacing, in ticks, through the deferred queue
pub const MEDIUM_SHOT_SPACING_TICKS: u64 = 6;
/// Cooldown resets below zero after a volley for extra recovery time
pub const VOLLEY_RECOVERY_TICKS: i32 = 20;
pub const MEDIUM_MOUNTS: [Vec2; 2] = [Vec2::new(-45.0, 0.0), Vec2::new(45.0, 40.0)];

pub const AA_INTERVAL: i32 = 60;
pub const AA_DAMAGE: f32 = 5.0;
pub const AA_ROUNDS: u32 = 5;
pub const AA_ROUND_SPACING_TICKS: u64 = 3;
pub const AA_MOUNTS: [Vec2; 4] = [
    Vec2::new(-35.0, -80.0),
    Vec2::new(35.0, -80.0),
    Vec2::new(-35.0, 80.0),
    Vec2::new(35.0, 80.0),
];

/// Escort hulls sit either side of the carrier, slightly astern
pub const ESCORT_OFFSET: Vec2 = Vec2::new(120.0, 50.0);
pub const ESCORT_MAIN_INTERVAL: i32 = 360;
pub const ESCORT_MAIN_MOUNTS: [Vec2; 2] = [Vec2::new(0.0, -10.0), Vec2::new(0.0, 40.0)];
pub const ESCORT_SMALL_INTERVAL: i32 = 60;
pub const ESCORT_SMALL_MOUNT: Vec2 = Vec2::new(0.0, -40.0);
pub const ESCORT_SMALL_DAMAGE: f32 = 10.0;
pub const ESCORT_SMALL_VOLLEYS: u32 = 3;
pub const ESCORT_AA_INTERVAL: i32 = 60;
pub const ESCORT_AA_MOUNT: Vec2 = Vec2::new(0.0, 20.0);
pub const ESCORT_AA_ROUNDS: u32 = 5;
pub const ESCORT_AA_DAMAGE: f32 = 5.0;

pub const ROCKET_INTERVAL: i32 = 300;
/// Rear rocket battery mount, relative to the carrier center
pub const ROCKET_MOUNT: Vec2 = Vec2::new(0.0, 100.0);

// --- Fire primitive ---

/// Player spread narrows with the accuracy upgrade; enemy spread is fixed.
pub const PLAYER_BASE_SPREAD: f32 = 0.2;
pub const ENEMY_BULLET_SPREAD: f32 = 0.3;
pub const ENEMY_HEAVY_SPREAD: f32 = 0.1;

pub const MUZZLE_OFFSET_CANNON: f32 = 30.0;
pub const MUZZLE_OFFSET_ROCKET: f32 = 10.0;
pub const MUZZLE_OFFSET_DEFAULT: f32 = 20.0;

pub const PROJECTILE_SPEED: f32 = 6.0;
pub const ROCKET_LAUNCH_SPEED: f32 = 2.0;
/// Rockets accelerate to this once a homing correction kicks in
pub const ROCKET_HOMING_SPEED: f32 = 6.0;

pub fn projectile_size(kind: ProjectileKind) -> Vec2 {
    match kind {
        ProjectileKind::Bullet => Vec2::new(3.0, 6.0),
        ProjectileKind::Cannon => Vec2::new(6.0, 12.0),
        ProjectileKind::Bomb | ProjectileKind::Rocket => Vec2::new(8.0, 16.0),
    }
}

// --- Friendly aircraft ---

pub const FRIENDLY_MAX_HP: f32 = 100.0;
pub const FIGHTER_SIZE: Vec2 = Vec2::new(20.0, 20.0);
pub const BOMBER_SIZE: Vec2 = Vec2::new(45.0, 45.0);
pub const FIGHTER_MAX_AMMO: u32 = 50;
pub const BOMBER_MAX_AMMO: u32 = 3;
pub const FIGHTER_SPAWN_INTERVAL: u32 = 180;
pub const BOMBER_SPAWN_INTERVAL: u32 = 300;
pub const FIGHTER_LAUNCH_SPEED: f32 = 6.0;
pub const BOMBER_LAUNCH_SPEED: f32 = 4.0;
/// Catapult acceleration per tick, up to the launch speed cap
pub const LAUNCH_ACCEL: f32 = 0.2;
pub const LAUNCH_MAX_SPEED: f32 = 8.0;
/// Units above the deck at which a launching aircraft goes airborne
pub const LAUNCH_EXIT_OFFSET: f32 = 200.0;

pub const FIGHTER_SPEED: f32 = 5.0;
pub const BOMBER_SPEED: f32 = 3.0;
/// Fighters trail chased planes by this many target-widths
pub const CHASE_STANDOFF_WIDTHS: f32 = 4.0;
/// Within this distance of the chase point the fighter matches target heading
pub const FORMATION_ALIGN_DIST: f32 = 20.0;
pub const FIGHTER_FIRE_PROB: f32 = 0.1;
pub const FIGHTER_GUN_RANGE: f32 = 400.0;
pub const FIGHTER_GUN_DAMAGE: f32 = 1.0;
pub const FIGHTER_GUN_AMMO_COST: u32 = 1;
/// Fighters drop a bomb once inside this box around a surface target
pub const FIGHTER_BOMB_BOX: f32 = 40.0;
pub const FIGHTER_BOMB_DAMAGE: f32 = 100.0;
pub const FIGHTER_BOMB_AMMO_COST: u32 = 10;

/// Bombers lock heading inside this range to avoid terminal jitter
pub const BOMBER_HEADING_LOCK_DIST: f32 = 150.0;
pub const BOMBER_DROP_RANGE: f32 = 30.0;
pub const BOMBER_HIT_CHANCE: f32 = 0.7;
pub const BOMBER_DROP_COOLDOWN: u32 = 30;
pub const BOMBER_BOMB_DAMAGE: f32 = 100.0;
/// Missed bombs splash beside the target hull
pub const BOMB_MISS_MARGIN: f32 = 50.0;
pub const BOMB_MISS_SPREAD: f32 = 50.0;
pub const BOMB_MISS_JITTER: f32 = 50.0;

pub const PATROL_SPEED: f32 = 2.0;
pub const RETURN_SPEED: f32 = 5.0;
/// Landing approach point sits behind the carrier, past the bottom edge
pub const APPROACH_OFFSET_Y: f32 = 300.0;
pub const APPROACH_CAPTURE_DIST: f32 = 20.0;
/// Stern entry point at the end of the runway
pub const STERN_OFFSET_Y: f32 = 120.0;
pub const LAND_CAPTURE_DIST: f32 = 5.0;
pub const FIGHTER_LAND_SPEED: f32 = 4.0;
pub const BOMBER_LAND_SPEED: f32 = 2.0;
pub const REARM_TICKS: u32 = 180;
/// Parking slots run from the bow end of the runway toward the stern
pub const PARK_FIRST_OFFSET_Y: f32 = -80.0;
pub const PARK_SPACING_Y: f32 = 35.0;
pub const PARK_LIMIT_OFFSET_Y: f32 = 130.0;
pub const TAXI_SPEED: f32 = 2.0;
/// Rearmed aircraft roll off the parking slot at this initial speed
pub const RELAUNCH_SPEED: f32 = 1.0;

// --- Progression ---

pub const INITIAL_MAX_HP: f32 = 100.0;
pub const INITIAL_MAX_XP: f32 = 100.0;
pub const XP_THRESHOLD_GROWTH: f32 = 1.5;
pub const VICTORY_BONUS: f32 = 5000.0;
pub const LEVEL_UP_CHOICES: usize = 3;

// --- Damage points (persistent fire/smoke anchors on airborne hulls) ---

pub const DAMAGE_POINT_CHANCE: f32 = 0.4;
pub const DAMAGE_POINT_SPREAD_X: f32 = 60.0;
pub const DAMAGE_POINT_SPREAD_Y: f32 = 40.0;

// --- Per-kind enemy stat profiles ---

#[derive(Debug, Clone, Copy)]
pub struct EnemyProfile {
    pub hp: f32,
    pub damage: f32,
    pub hit_chance: f32,
    pub score_value: f32,
    pub money_value: f32,
    pub width: f32,
    pub height: f32,
    pub spawn_y: f32,
}

/// Base (wave-1) stats per enemy kind. HP and damage scale with the wave
/// number for everything except the boss.
pub fn enemy_profile(kind: EnemyKind) -> EnemyProfile {
    match kind {
        EnemyKind::PlaneSmall => EnemyProfile {
            hp: 10.0,
            damage: 0.2,
            hit_chance: 0.2,
            score_value: 10.0,
            money_value: 5.0,
            width: 25.0,
            height: 25.0,
            spawn_y: -100.0,
        },
        EnemyKind::PlaneLarge => EnemyProfile {
            hp: 100.0,
            damage: 2.0,
            hit_chance: 0.1,
            score_value: 10.0,
            money_value: 20.0,
            width: 50.0,
            height: 50.0,
            spawn_y: -100.0,
        },
        EnemyKind::ShipSmall => EnemyProfile {
            hp: 200.0,
            damage: 0.5,
            hit_chance: 0.2,
            score_value: 10.0,
            money_value: 30.0,
            width: 50.0,
            height: 100.0,
            spawn_y: -120.0,
        },
        EnemyKind::ShipMedium => EnemyProfile {
            hp: 600.0,
            damage: 2.0,
            hit_chance: 0.2,
            score_value: 10.0,
            money_value: 50.0,
            width: 70.0,
            height: 140.0,
            spawn_y: -160.0,
        },
        EnemyKind::Boss => EnemyProfile {
            hp: 1500.0,
            damage: 5.0,
            hit_chance: 0.2,
            score_value: 10.0,
            money_value: 5000.0,
            width: 150.0,
            height: 300.0,
            spawn_y: -100.0,
        },
    }
}
