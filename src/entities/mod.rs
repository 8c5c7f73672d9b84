pub mod enemy;
pub mod friendly;
pub mod projectile;
pub mod store;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Monotonic per-run entity identifier. Never reused within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Physical state shared by every simulated object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in radians; 0 faces right, PI/2 faces down the field.
    pub rotation: f32,
    /// Bounding extents (width, height).
    pub size: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    pub marked_for_deletion: bool,
    /// Local offsets where persistent fire/smoke anchors once the hull is
    /// damaged. Cleared on repair/rearm.
    pub damage_points: Vec<Vec2>,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, hp: f32, rotation: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            rotation,
            size,
            hp,
            max_hp: hp,
            marked_for_deletion: false,
            damage_points: Vec::new(),
        }
    }

    /// Circle-approximate hit radius: half the larger bounding dimension.
    pub fn hit_radius(&self) -> f32 {
        self.size.max_element() * 0.5
    }

    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp > 0.0 {
            (self.hp / self.max_hp).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
