//! Command use cases.
//!
//! Issuing behavior commands to one NPC or to a whole group, and the
//! read-side question of what an actor is allowed to command.

mod access;
mod group;
mod single;

pub use access::{ActorAccess, ControllableGroup, ControllableNpc};
pub use group::{CommandGroup, GroupCommandReport};
pub use single::{CommandNpc, NpcCommandReport};

use std::sync::Arc;

use gangnpc_domain::{
    group_permission, resolve_control, ActorId, AdvancedGroup, ControlDecision, DomainError,
    GroupAccess, Npc, NpcId,
};
use uuid::Uuid;

use crate::infrastructure::ports::RepoError;

/// Container for command use cases.
pub struct CommandUseCases {
    pub npc: Arc<CommandNpc>,
    pub group: Arc<CommandGroup>,
    pub access: Arc<ActorAccess>,
}

impl CommandUseCases {
    pub fn new(npc: Arc<CommandNpc>, group: Arc<CommandGroup>, access: Arc<ActorAccess>) -> Self {
        Self { npc, group, access }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("NPC not found: {0}")]
    NotFound(NpcId),
    /// The id in the request is not a UUID.
    #[error("NPC not found: {0}")]
    UnknownNpc(String),
    #[error("No NPCs in group: {0}")]
    GroupNotFound(String),
    #[error("Actor {actor} may not command NPC {npc}")]
    Unauthorized { actor: ActorId, npc: NpcId },
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Combined permission check. A group whose member list cannot be fully
/// evaluated is treated as a denial, with a warning.
fn authorize(npc: &Npc, group: Option<&AdvancedGroup>, actor: &ActorId) -> ControlDecision {
    let decision = resolve_control(npc, group, actor);
    if decision.allowed {
        return decision;
    }

    if let Some(group) = group.filter(|g| npc.advanced_group_id() == Some(g.id())) {
        if let GroupAccess::Undetermined(kinds) = group_permission(group, actor) {
            let kinds: Vec<&str> = kinds.iter().map(|k| k.as_str()).collect();
            tracing::warn!(
                npc_id = %npc.id(),
                advanced_group_id = %group.id(),
                actor_id = %actor,
                unresolved = ?kinds,
                "Group membership could not be evaluated, denying control"
            );
        }
    }
    decision
}
