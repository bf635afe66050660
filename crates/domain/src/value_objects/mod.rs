//! Value objects - immutable, validated building blocks of the NPC model.

mod actor;
mod combat_stats;
mod command;
mod faction;
mod formation;
mod membership;
mod names;
mod vector;

pub use actor::{parse_token_list, ActorId};
pub use combat_stats::{Accuracy, Armor, CombatStats, Health};
pub use command::{CommandVerb, NpcCommand, NpcState, NpcTarget};
pub use faction::{Faction, FactionCatalog, FactionProfile};
pub use formation::{Formation, CIRCLE_RADIUS, FORMATION_SPACING, SCATTER_EXTENT};
pub use membership::{
    GroupMember, MemberRole, MemberSelector, PatrolArea, SelectorKind, SelectorMatch,
};
pub use names::{Description, GroupName};
pub use vector::Vec3;
