//! Repository port traits for document storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gangnpc_domain::{AdvancedGroup, AdvancedGroupId, Npc, NpcId, SpawnGroupId};
use uuid::Uuid;

use super::error::RepoError;
use super::types::{FactionCount, SpawnGroupSummary};

// =============================================================================
// NPC Documents
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NpcRepo: Send + Sync {
    // CRUD
    async fn get(&self, id: NpcId) -> Result<Option<Npc>, RepoError>;
    async fn insert(&self, npc: &Npc) -> Result<(), RepoError>;
    /// Replace an existing document. `NotFound` if the NPC is gone.
    async fn save(&self, npc: &Npc) -> Result<(), RepoError>;
    /// Returns whether a document was removed.
    async fn delete(&self, id: NpcId) -> Result<bool, RepoError>;

    // Queries (oldest first)
    async fn list_all(&self) -> Result<Vec<Npc>, RepoError>;
    /// NPCs whose spawn-group id or advanced-group id equals `key`.
    async fn list_by_group_key(&self, key: Uuid) -> Result<Vec<Npc>, RepoError>;
    async fn list_by_advanced_group(&self, group_id: AdvancedGroupId)
        -> Result<Vec<Npc>, RepoError>;

    // Bulk operations - return the number of affected documents
    async fn delete_many(&self, ids: &[NpcId]) -> Result<u64, RepoError>;
    async fn delete_all(&self) -> Result<u64, RepoError>;
    async fn delete_spawn_group(&self, group_id: SpawnGroupId) -> Result<u64, RepoError>;
    /// Drop the advanced-group reference from every NPC that carries it,
    /// stamping each released document with `now`.
    async fn clear_advanced_group(
        &self,
        group_id: AdvancedGroupId,
        now: DateTime<Utc>,
    ) -> Result<u64, RepoError>;

    // Statistics
    async fn count(&self) -> Result<u64, RepoError>;
    async fn faction_distribution(&self) -> Result<Vec<FactionCount>, RepoError>;
    async fn spawn_group_summaries(&self) -> Result<Vec<SpawnGroupSummary>, RepoError>;
}

// =============================================================================
// Advanced Group Documents
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdvancedGroupRepo: Send + Sync {
    async fn get(&self, id: AdvancedGroupId) -> Result<Option<AdvancedGroup>, RepoError>;
    async fn list(&self) -> Result<Vec<AdvancedGroup>, RepoError>;
    /// Insert or replace.
    async fn save(&self, group: &AdvancedGroup) -> Result<(), RepoError>;
    async fn delete(&self, id: AdvancedGroupId) -> Result<bool, RepoError>;
    async fn count(&self) -> Result<u64, RepoError>;
}
