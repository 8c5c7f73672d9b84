pub mod run_state;
pub mod skills;
pub mod snapshot;
pub mod upgrades;
