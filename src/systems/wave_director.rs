//! Wave composition and spawning: how many enemies remain, which kind comes
//! next, and when the wave counter advances.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaChaRng;

use crate::engine::config;
use crate::entities::enemy::{Enemy, EnemyKind, EnemyState, FlightState};
use crate::entities::store::EntityStore;
use crate::entities::{Body, EntityId};
use crate::events::game_events::{GameEvent, WaveCompleteEvent};
use crate::state::run_state::PlayerStats;

/// Spawn bookkeeping for the wave in progress.
#[derive(Debug, Clone)]
pub struct WaveState {
    pub remaining_to_spawn: u32,
    pub spawn_timer: u32,
}

impl WaveState {
    pub fn for_wave(wave: u32) -> Self {
        let remaining = if wave == config::BOSS_WAVE {
            1
        } else {
            (config::WAVE_SIZE_BASE + config::WAVE_SIZE_PER_WAVE * wave as f32).floor() as u32
        };
        Self {
            remaining_to_spawn: remaining,
            spawn_timer: config::FIRST_SPAWN_DELAY_TICKS,
        }
    }

    pub fn all_spawned(&self) -> bool {
        self.remaining_to_spawn == 0
    }
}

impl Default for WaveState {
    fn default() -> Self {
        Self::for_wave(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveOutcome {
    Continue,
    /// The boss wave was cleared; the run is won.
    Victory,
}

pub fn run(
    store: &mut EntityStore,
    wave: &mut WaveState,
    stats: &mut PlayerStats,
    rng: &mut ChaChaRng,
    tick: u64,
    events: &mut Vec<GameEvent>,
) -> WaveOutcome {
    if wave.remaining_to_spawn > 0 && store.enemies.len() < config::LIVE_ENEMY_CAP {
        if wave.spawn_timer > 0 {
            wave.spawn_timer -= 1;
        } else {
            let kind = if stats.wave == config::BOSS_WAVE {
                EnemyKind::Boss
            } else {
                draw_kind(stats.wave, store.ship_count(), rng)
            };
            spawn_enemy(store, rng, kind, stats.wave);
            wave.remaining_to_spawn -= 1;
            wave.spawn_timer = config::SPAWN_INTERVAL_TICKS;
        }
    } else if wave.all_spawned() && store.enemies.is_empty() {
        if stats.wave == config::BOSS_WAVE {
            return WaveOutcome::Victory;
        }
        events.push(GameEvent::WaveComplete(WaveCompleteEvent {
            wave_number: stats.wave,
            tick,
        }));
        stats.wave += 1;
        *wave = WaveState::for_wave(stats.wave);
        log::debug!(
            "wave {} begins: {} enemies to spawn",
            stats.wave,
            wave.remaining_to_spawn
        );
    }
    WaveOutcome::Continue
}

/// One uniform draw against nested, wave-gated thresholds; the first
/// matching threshold wins.
fn draw_kind(wave: u32, ship_count: usize, rng: &mut ChaChaRng) -> EnemyKind {
    let roll: f32 = rng.gen();
    let mut kind = EnemyKind::PlaneSmall;
    if wave > config::LARGE_PLANE_MIN_WAVE && roll < config::LARGE_PLANE_THRESHOLD {
        kind = EnemyKind::PlaneLarge;
    } else if wave > config::SMALL_SHIP_MIN_WAVE && roll < config::SMALL_SHIP_THRESHOLD {
        kind = EnemyKind::ShipSmall;
    } else if wave > config::MEDIUM_SHIP_MIN_WAVE && roll < config::MEDIUM_SHIP_THRESHOLD {
        kind = EnemyKind::ShipMedium;
    }

    // A wall of ships can blockade the field; force the spawn back to a plane.
    if kind.is_ship() && ship_count > config::SHIP_BLOCKADE_LIMIT {
        kind = EnemyKind::PlaneSmall;
    }
    kind
}

/// Construct one enemy at the top of the field with wave-scaled stats.
pub fn spawn_enemy(
    store: &mut EntityStore,
    rng: &mut ChaChaRng,
    kind: EnemyKind,
    wave: u32,
) -> EntityId {
    let profile = config::enemy_profile(kind);
    // The boss has fixed stats regardless of wave number.
    let (hp_scale, dmg_scale) = if kind == EnemyKind::Boss {
        (1.0, 1.0)
    } else {
        (
            config::ENEMY_HP_SCALE.powi(wave as i32 - 1),
            config::ENEMY_DMG_SCALE.powi(wave as i32 - 1),
        )
    };
    let x = if kind == EnemyKind::Boss {
        config::FIELD_WIDTH * 0.5
    } else {
        rng.gen_range(config::SPAWN_EDGE_INSET..config::FIELD_WIDTH - config::SPAWN_EDGE_INSET)
    };
    let state = match kind {
        EnemyKind::PlaneSmall | EnemyKind::PlaneLarge => {
            EnemyState::Flight(FlightState::Approach)
        }
        EnemyKind::ShipSmall | EnemyKind::ShipMedium => EnemyState::Station,
        EnemyKind::Boss => EnemyState::Boss { attack_phase: 0 },
    };

    let id = store.ids.allocate();
    store.enemies.push(Enemy {
        id,
        kind,
        body: Body::new(
            Vec2::new(x, profile.spawn_y),
            Vec2::new(profile.width, profile.height),
            profile.hp * hp_scale,
            FRAC_PI_2,
        ),
        damage: profile.damage * dmg_scale,
        hit_chance: profile.hit_chance,
        score_value: profile.score_value,
        money_value: profile.money_value,
        attack_cooldown: 0,
        burst: None,
        state,
        wobble_seed: rng.gen_range(0.0..TAU),
        destroyed: false,
    });
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn wave_size_follows_formula() {
        for wave in 1..config::BOSS_WAVE {
            let expected = (10.0 + 1.5 * wave as f32).floor() as u32;
            assert_eq!(WaveState::for_wave(wave).remaining_to_spawn, expected);
        }
        assert_eq!(WaveState::for_wave(config::BOSS_WAVE).remaining_to_spawn, 1);
    }

    #[test]
    fn early_waves_only_draw_small_planes() {
        let mut rng = ChaChaRng::seed_from_u64(7);
        for _ in 0..200 {
            assert_eq!(draw_kind(1, 0, &mut rng), EnemyKind::PlaneSmall);
            assert_eq!(draw_kind(2, 0, &mut rng), EnemyKind::PlaneSmall);
        }
    }

    #[test]
    fn ship_blockade_downgrades_to_plane() {
        let mut rng = ChaChaRng::seed_from_u64(7);
        for _ in 0..200 {
            let kind = draw_kind(10, config::SHIP_BLOCKADE_LIMIT + 1, &mut rng);
            assert!(!kind.is_ship());
        }
    }

    #[test]
    fn spawned_enemy_stats_scale_with_wave() {
        let mut store = EntityStore::new();
        let mut rng = ChaChaRng::seed_from_u64(7);
        let id = spawn_enemy(&mut store, &mut rng, EnemyKind::ShipSmall, 5);
        let enemy = store.enemy(id).unwrap();
        let scale = config::ENEMY_HP_SCALE.powi(4);
        assert!((enemy.body.hp - 200.0 * scale).abs() < 1e-3);
        assert!((enemy.damage - 0.5 * scale).abs() < 1e-4);
        assert_eq!(enemy.body.hp, enemy.body.max_hp);
    }

    #[test]
    fn boss_stats_ignore_wave_scaling() {
        let mut store = EntityStore::new();
        let mut rng = ChaChaRng::seed_from_u64(7);
        let id = spawn_enemy(&mut store, &mut rng, EnemyKind::Boss, config::BOSS_WAVE);
        let boss = store.enemy(id).unwrap();
        assert_eq!(boss.body.hp, 1500.0);
        assert_eq!(boss.damage, 5.0);
    }
}
