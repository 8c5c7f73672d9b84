use serde::{Deserialize, Serialize};

use super::{Body, EntityId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FriendlyKind {
    Fighter,
    Bomber,
}

impl FriendlyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendlyKind::Fighter => "Fighter",
            FriendlyKind::Bomber => "Bomber",
        }
    }
}

/// Launch/combat/land/rearm cycle. Friendly units are never destroyed; they
/// loop through these states for as long as their enabling skill is active.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum FriendlyState {
    /// Accelerating up the runway centerline.
    Launching,
    /// In combat; `drop_timer` spaces consecutive bomb drops.
    Airborne { drop_timer: u32 },
    /// Flying to the approach point behind the carrier.
    Returning,
    /// Decelerating up the runway to the stern entry.
    Landing,
    /// Parked in the rearm queue until the timer expires.
    Rearming { timer: u32 },
}

impl FriendlyState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendlyState::Launching => "Launching",
            FriendlyState::Airborne { .. } => "Airborne",
            FriendlyState::Returning => "Returning",
            FriendlyState::Landing => "Landing",
            FriendlyState::Rearming { .. } => "Rearming",
        }
    }

    pub fn is_rearming(&self) -> bool {
        matches!(self, FriendlyState::Rearming { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendlyUnit {
    pub id: EntityId,
    pub kind: FriendlyKind,
    pub body: Body,
    pub ammo: u32,
    pub max_ammo: u32,
    pub state: FriendlyState,
}
