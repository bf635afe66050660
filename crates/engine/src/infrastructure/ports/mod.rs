//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Document storage (could swap SQLite -> another document store)
//! - Clock/Random (for testing)

mod error;
mod repos;
mod testing;
pub mod types;

pub use repos::{AdvancedGroupRepo, NpcRepo};
pub use types::{FactionCount, SpawnGroupSummary};

#[cfg(test)]
pub use repos::{MockAdvancedGroupRepo, MockNpcRepo};

#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};

pub use testing::{ClockPort, RandomPort};

pub use error::RepoError;
