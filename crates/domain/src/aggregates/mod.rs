//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Has a unique identity
//! - Keeps its fields private and exposes behavior through methods
//! - Returns outcome values from mutations instead of booleans
//!
//! | Concern | How it is expressed |
//! |---------|---------------------|
//! | Validation | Newtypes valid by construction (`Health`, `GroupName`, ...) |
//! | Construction | `::new()` + `with_*` builders |
//! | Partial updates | `*Update` structs of optional fields |
//! | Command results | Return enums from mutations |

pub mod advanced_group;
pub mod npc;

pub use advanced_group::{AdvancedGroup, AdvancedGroupUpdate};
pub use npc::{CommandOutcome, Npc, NpcLoadout, NpcUpdate};
