//! Use cases - request orchestration.
//!
//! Each module contains use cases for one area of the API. Use cases
//! validate input, load aggregates through the repository ports, apply
//! domain rules and persist the result.

pub mod advanced_group;
pub mod command;
pub mod npc;
pub mod stats;
pub mod validation;

pub use advanced_group::{AdvancedGroupError, AdvancedGroupOps};
pub use command::{CommandError, CommandUseCases};
pub use npc::{NpcError, NpcUseCases};
pub use stats::{StatsError, StatsOps};
