//! Who may command an NPC.
//!
//! Direct NPC permission (owner/friendly lists) is checked first; an NPC's
//! advanced group can grant control on top of that. All functions here are
//! pure.

use serde::{Deserialize, Serialize};

use crate::aggregates::{AdvancedGroup, Npc};
use crate::value_objects::{ActorId, MemberRole, SelectorKind, SelectorMatch};

/// How much control an actor has. Ordered: `Unauthorized < Friendly < Owner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlLevel {
    Unauthorized,
    Friendly,
    Owner,
}

impl ControlLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlLevel::Unauthorized => "unauthorized",
            ControlLevel::Friendly => "friendly",
            ControlLevel::Owner => "owner",
        }
    }
}

impl std::fmt::Display for ControlLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlDecision {
    pub allowed: bool,
    pub level: ControlLevel,
}

impl ControlDecision {
    pub const UNAUTHORIZED: Self = Self {
        allowed: false,
        level: ControlLevel::Unauthorized,
    };

    fn granted(level: ControlLevel) -> Self {
        Self {
            allowed: true,
            level,
        }
    }
}

/// Result of evaluating an advanced group's member list for one actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupAccess {
    Granted { role: MemberRole, level: ControlLevel },
    /// `role` is the matching entry's role, `None` if nothing matched.
    Denied { role: Option<MemberRole> },
    /// Nothing matched, but entries of these kinds could not be evaluated.
    Undetermined(Vec<SelectorKind>),
}

impl GroupAccess {
    pub fn decision(&self) -> ControlDecision {
        match self {
            GroupAccess::Granted { level, .. } => ControlDecision::granted(*level),
            GroupAccess::Denied { .. } | GroupAccess::Undetermined(_) => {
                ControlDecision::UNAUTHORIZED
            }
        }
    }
}

/// Direct permission from the NPC's own lists. Owners win over friends.
pub fn can_control(npc: &Npc, actor: &ActorId) -> ControlDecision {
    if npc.owner_ids().contains(actor) {
        ControlDecision::granted(ControlLevel::Owner)
    } else if npc.friendly_actor_ids().contains(actor) {
        ControlDecision::granted(ControlLevel::Friendly)
    } else {
        ControlDecision::UNAUTHORIZED
    }
}

/// First matching member entry decides.
pub fn group_permission(group: &AdvancedGroup, actor: &ActorId) -> GroupAccess {
    let mut unresolved: Vec<SelectorKind> = Vec::new();

    for member in group.members() {
        match member.selector.matches(actor) {
            SelectorMatch::Matched => return access_for_role(member.role),
            SelectorMatch::NoMatch => {}
            SelectorMatch::Unsupported(kind) => {
                if !unresolved.contains(&kind) {
                    unresolved.push(kind);
                }
            }
        }
    }

    if unresolved.is_empty() {
        GroupAccess::Denied { role: None }
    } else {
        GroupAccess::Undetermined(unresolved)
    }
}

fn access_for_role(role: MemberRole) -> GroupAccess {
    if !role.grants_control() {
        return GroupAccess::Denied { role: Some(role) };
    }
    let level = match role {
        MemberRole::Friendly => ControlLevel::Friendly,
        _ => ControlLevel::Owner,
    };
    GroupAccess::Granted { role, level }
}

/// Combined decision for an NPC.
///
/// `group` is the NPC's advanced group if the caller loaded it; a group
/// the NPC does not belong to is ignored.
pub fn resolve_control(npc: &Npc, group: Option<&AdvancedGroup>, actor: &ActorId) -> ControlDecision {
    let direct = can_control(npc, actor);
    if direct.allowed {
        return direct;
    }

    match group {
        Some(group) if npc.advanced_group_id() == Some(group.id()) => {
            group_permission(group, actor).decision()
        }
        _ => direct,
    }
}
