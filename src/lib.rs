//! Headless wave-survival combat simulation: a stationary carrier defends
//! itself against waves of air and sea attackers with automatic weapons and
//! deployable aircraft.
//!
//! The crate exposes a single entry point, [`Simulation`], which advances one
//! discrete tick per call and emits a serializable [`StateSnapshot`] plus a
//! drained stream of [`GameEvent`]s for rendering/audio consumers.
//!
//! [`Simulation`]: engine::simulation::Simulation
//! [`StateSnapshot`]: state::snapshot::StateSnapshot
//! [`GameEvent`]: events::game_events::GameEvent

pub mod engine;
pub mod entities;
pub mod events;
pub mod state;
pub mod systems;

pub use engine::simulation::{RunPhase, Simulation};
