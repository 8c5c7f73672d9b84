use glam::Vec2;

use super::enemy::Enemy;
use super::friendly::{FriendlyKind, FriendlyUnit};
use super::projectile::Projectile;
use super::EntityId;
use crate::engine::config;

/// Hands out run-unique entity ids.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

/// Owns the live entity collections for the current run. All mutation
/// happens in-place during the tick pass; dead entities are compacted at the
/// end of the tick, never mid-iteration.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    pub ids: IdAllocator,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub friendlies: Vec<FriendlyUnit>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything, including the id counter. Used at run start.
    pub fn clear(&mut self) {
        self.ids = IdAllocator::default();
        self.enemies.clear();
        self.projectiles.clear();
        self.friendlies.clear();
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn ship_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.kind.is_ship()).count()
    }

    pub fn friendly_count(&self, kind: FriendlyKind) -> usize {
        self.friendlies.iter().filter(|f| f.kind == kind).count()
    }

    /// Nearest live enemy matching the predicate, by squared distance.
    pub fn nearest_enemy_where<F>(&self, from: Vec2, pred: F) -> Option<&Enemy>
    where
        F: Fn(&Enemy) -> bool,
    {
        self.enemies
            .iter()
            .filter(|e| !e.body.marked_for_deletion && !e.destroyed && pred(e))
            .min_by(|a, b| {
                let da = a.body.pos.distance_squared(from);
                let db = b.body.pos.distance_squared(from);
                da.total_cmp(&db)
            })
    }

    pub fn nearest_airborne(&self, from: Vec2) -> Option<&Enemy> {
        self.nearest_enemy_where(from, |e| e.kind.is_airborne())
    }

    pub fn nearest_surface(&self, from: Vec2) -> Option<&Enemy> {
        self.nearest_enemy_where(from, |e| e.kind.is_surface())
    }

    /// End-of-tick compaction: drop marked entities, plus any enemy that has
    /// strayed past the playfield margin.
    pub fn compact(&mut self) {
        self.enemies
            .retain(|e| !e.body.marked_for_deletion && !out_of_margin(e.body.pos));
        self.projectiles.retain(|p| !p.body.marked_for_deletion);
        self.friendlies.retain(|f| !f.body.marked_for_deletion);
    }
}

fn out_of_margin(pos: Vec2) -> bool {
    pos.x < -config::OOB_MARGIN
        || pos.x > config::FIELD_WIDTH + config::OOB_MARGIN
        || pos.y < -config::OOB_MARGIN
        || pos.y > config::FIELD_HEIGHT + config::OOB_MARGIN
}
