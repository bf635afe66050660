//! Domain model for the gang NPC manager: NPCs, advanced groups, the faction
//! catalog, spawn formations and the permission rules that decide who may
//! command what.
//!
//! This crate has no I/O. Time and randomness are passed in by callers.

pub mod aggregates;
pub mod error;
pub mod ids;
pub mod permissions;
pub mod value_objects;

pub use aggregates::{
    AdvancedGroup, AdvancedGroupUpdate, CommandOutcome, Npc, NpcLoadout, NpcUpdate,
};
pub use error::DomainError;
pub use ids::{AdvancedGroupId, NpcId, SpawnGroupId};
pub use permissions::{
    can_control, group_permission, resolve_control, ControlDecision, ControlLevel, GroupAccess,
};
pub use value_objects::{
    parse_token_list, Accuracy, ActorId, Armor, CombatStats, CommandVerb, Description, Faction,
    FactionCatalog, FactionProfile, Formation, GroupMember, GroupName, Health, MemberRole,
    MemberSelector, NpcCommand, NpcState, NpcTarget, PatrolArea, SelectorKind, SelectorMatch,
    Vec3,
};
