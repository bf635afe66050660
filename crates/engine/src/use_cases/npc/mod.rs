//! NPC use cases.
//!
//! Spawning (validation, formation layout, batch insert) and the CRUD-style
//! operations on existing NPCs and spawn groups.

mod manage;
mod spawn;

pub use manage::NpcOps;
pub use spawn::SpawnNpcs;

use std::sync::Arc;

use gangnpc_domain::{AdvancedGroupId, DomainError, NpcId, SpawnGroupId};

use crate::infrastructure::ports::RepoError;

/// Container for NPC use cases.
pub struct NpcUseCases {
    pub spawn: Arc<SpawnNpcs>,
    pub ops: Arc<NpcOps>,
}

impl NpcUseCases {
    pub fn new(spawn: Arc<SpawnNpcs>, ops: Arc<NpcOps>) -> Self {
        Self { spawn, ops }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NpcError {
    #[error("NPC not found: {0}")]
    NotFound(NpcId),
    #[error("Spawn group not found: {0}")]
    SpawnGroupNotFound(SpawnGroupId),
    #[error("Advanced group not found: {0}")]
    AdvancedGroupNotFound(AdvancedGroupId),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
