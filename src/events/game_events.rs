use serde::{Deserialize, Serialize};

use crate::entities::enemy::EnemyKind;

/// Weapon sound class for shot-fired notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotCategory {
    MachineGun,
    Cannon,
    Rocket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionSize {
    Small,
    Large,
    ExtraLarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplashSize {
    Small,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTarget {
    Enemy,
    Carrier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotFiredEvent {
    pub category: ShotCategory,
    pub x: f32,
    pub y: f32,
    pub tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BombDroppedEvent {
    pub x: f32,
    pub y: f32,
    pub tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionEvent {
    pub size: ExplosionSize,
    pub x: f32,
    pub y: f32,
    pub tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplashEvent {
    pub size: SplashSize,
    pub x: f32,
    pub y: f32,
    pub tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitEvent {
    pub target: HitTarget,
    pub x: f32,
    pub y: f32,
    pub tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyDestroyedEvent {
    pub enemy_id: u32,
    pub kind: EnemyKind,
    pub xp_awarded: f32,
    pub money_awarded: f32,
    pub tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelUpEvent {
    pub level: u32,
    pub tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveCompleteEvent {
    pub wave_number: u32,
    pub tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameOverEvent {
    pub money_earned: f32,
    pub tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VictoryEvent {
    pub money_earned: f32,
    pub bonus: f32,
    pub tick: u64,
}

/// Fire-and-forget notifications for audio/UI collaborators, drained once
/// per tick via [`crate::Simulation::drain_events`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired(ShotFiredEvent),
    BombDropped(BombDroppedEvent),
    Explosion(ExplosionEvent),
    Splash(SplashEvent),
    Hit(HitEvent),
    EnemyDestroyed(EnemyDestroyedEvent),
    LevelUp(LevelUpEvent),
    WaveComplete(WaveCompleteEvent),
    GameOver(GameOverEvent),
    Victory(VictoryEvent),
}
