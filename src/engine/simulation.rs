//! Top-level simulation orchestrator.
//!
//! Owns the entity store, the seeded RNG, and all per-run state, and runs the
//! systems in a fixed order each tick. Completely headless: rendering and
//! audio consume the returned snapshots and the drained event stream.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};

use crate::engine::config;
use crate::entities::store::EntityStore;
use crate::events::game_events::{GameEvent, GameOverEvent, LevelUpEvent, VictoryEvent};
use crate::state::run_state::PlayerStats;
use crate::state::skills::{SkillKind, SkillSet};
use crate::state::snapshot::{self, StateSnapshot};
use crate::state::upgrades::{UpgradeKind, UpgradeLevels};
use crate::systems;
use crate::systems::friendly_ai::HangarState;
use crate::systems::wave_director::{WaveOutcome, WaveState};
use crate::systems::weapons::WeaponState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    Menu,
    Playing,
    Paused,
    /// Clock suspended while the player picks a level-up reward.
    LevelUp,
    GameOver,
    Victory,
}

/// The simulation. One discrete tick per rendered frame; no tick is
/// delivered outside the `Playing` phase, so pausing, the level-up pick, and
/// the terminal states all freeze every counter in place.
pub struct Simulation {
    pub store: EntityStore,
    pub tick: u64,
    pub phase: RunPhase,
    pub rng: ChaChaRng,
    pub seed: u64,
    pub stats: PlayerStats,
    pub skills: SkillSet,
    pub upgrades: UpgradeLevels,
    pub wave: WaveState,
    pub weapons: WeaponState,
    pub hangar: HangarState,
    /// Skills offered for the pending level-up pick, empty otherwise.
    pub reward_options: Vec<SkillKind>,
    pending_events: Vec<GameEvent>,
}

impl Simulation {
    pub fn new() -> Self {
        Self::new_with_seed(42)
    }

    pub fn new_with_seed(seed: u64) -> Self {
        Self::new_with_upgrades(UpgradeLevels::default(), seed)
    }

    /// Permanent upgrade levels are the run-start input from meta-progression.
    pub fn new_with_upgrades(upgrades: UpgradeLevels, seed: u64) -> Self {
        Self {
            store: EntityStore::new(),
            tick: 0,
            phase: RunPhase::Menu,
            rng: ChaChaRng::seed_from_u64(seed),
            seed,
            stats: PlayerStats::default(),
            skills: SkillSet::default(),
            upgrades,
            wave: WaveState::default(),
            weapons: WeaponState::default(),
            hangar: HangarState::default(),
            reward_options: Vec::new(),
            pending_events: Vec::new(),
        }
    }

    /// Reset all per-run transient state and enter active play. Permanent
    /// upgrades are untouched.
    pub fn start_run(&mut self) {
        self.store.clear();
        self.tick = 0;
        self.skills = SkillSet::default();
        self.weapons = WeaponState::default();
        self.hangar = HangarState::default();
        self.reward_options.clear();
        self.pending_events.clear();
        let max_hp = config::INITIAL_MAX_HP * self.upgrades.multiplier(UpgradeKind::MaxHp);
        self.stats = PlayerStats::new_run(max_hp);
        self.wave = WaveState::for_wave(1);
        self.phase = RunPhase::Playing;
        log::info!("run started (seed {})", self.seed);
    }

    /// Advance the simulation by one tick (a no-op outside active play) and
    /// return the resulting snapshot.
    pub fn tick(&mut self) -> StateSnapshot {
        if self.phase == RunPhase::Playing {
            self.step();
            self.tick += 1;
        }
        self.build_snapshot()
    }

    fn step(&mut self) {
        let wave_outcome = systems::wave_director::run(
            &mut self.store,
            &mut self.wave,
            &mut self.stats,
            &mut self.rng,
            self.tick,
            &mut self.pending_events,
        );
        systems::enemy_ai::run(
            &mut self.store,
            &mut self.rng,
            &self.upgrades,
            self.tick,
            &mut self.pending_events,
        );
        systems::weapons::run(
            &mut self.store,
            &mut self.weapons,
            &self.skills,
            &self.upgrades,
            &mut self.stats,
            &mut self.rng,
            self.tick,
            &mut self.pending_events,
        );
        systems::friendly_ai::run(
            &mut self.store,
            &mut self.hangar,
            &self.skills,
            &self.upgrades,
            &mut self.rng,
            self.tick,
            &mut self.pending_events,
        );
        let resolution = systems::projectiles::run(
            &mut self.store,
            &mut self.stats,
            &self.upgrades,
            &mut self.rng,
            self.tick,
            &mut self.pending_events,
        );
        self.store.compact();

        // Terminal checks after all systems: a last in-flight enemy round can
        // still sink the carrier on the tick the field clears, and defeat wins.
        if resolution.game_over {
            self.finish(RunPhase::GameOver);
            self.pending_events.push(GameEvent::GameOver(GameOverEvent {
                money_earned: self.stats.money,
                tick: self.tick,
            }));
            log::info!(
                "carrier sunk on wave {} with {} earned",
                self.stats.wave,
                self.stats.money
            );
        } else if wave_outcome == WaveOutcome::Victory {
            self.stats.money += config::VICTORY_BONUS;
            self.finish(RunPhase::Victory);
            self.pending_events.push(GameEvent::Victory(VictoryEvent {
                money_earned: self.stats.money,
                bonus: config::VICTORY_BONUS,
                tick: self.tick,
            }));
            log::info!("fleet neutralized, {} earned", self.stats.money);
        } else if resolution.level_ups > 0 {
            self.enter_level_up();
        }
    }

    fn finish(&mut self, phase: RunPhase) {
        // Pending staggered volleys die with the run.
        self.weapons.deferred.clear();
        self.phase = phase;
    }

    fn enter_level_up(&mut self) {
        self.pending_events.push(GameEvent::LevelUp(LevelUpEvent {
            level: self.stats.level,
            tick: self.tick,
        }));
        let mut available = self.skills.available();
        if available.is_empty() {
            // Every skill maxed: nothing to offer, keep playing.
            return;
        }
        available.shuffle(&mut self.rng);
        available.truncate(config::LEVEL_UP_CHOICES);
        self.reward_options = available;
        self.phase = RunPhase::LevelUp;
    }

    /// The out-of-band level-up choice. Validates the pick against the
    /// offered set, raises the skill, and resumes the clock.
    pub fn pick_reward(&mut self, kind: SkillKind) -> Result<(), String> {
        if self.phase != RunPhase::LevelUp {
            return Err("no reward pick is pending".into());
        }
        if !self.reward_options.contains(&kind) {
            return Err(format!("{} was not offered", kind.as_str()));
        }
        self.skills.raise(kind)?;
        self.reward_options.clear();
        self.phase = RunPhase::Playing;
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.phase == RunPhase::Playing {
            self.phase = RunPhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == RunPhase::Paused {
            self.phase = RunPhase::Playing;
        }
    }

    /// Abandon the run: discard every piece of per-run transient state
    /// without touching permanent upgrades.
    pub fn return_to_menu(&mut self) {
        self.store.clear();
        self.weapons = WeaponState::default();
        self.hangar = HangarState::default();
        self.skills = SkillSet::default();
        self.reward_options.clear();
        self.pending_events.clear();
        self.stats = PlayerStats::default();
        self.phase = RunPhase::Menu;
    }

    /// Drain all pending game events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Build a snapshot without advancing the simulation.
    pub fn build_snapshot(&self) -> StateSnapshot {
        let phase = format!("{:?}", self.phase);
        snapshot::build(&self.store, &self.stats, self.tick, &phase)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}
