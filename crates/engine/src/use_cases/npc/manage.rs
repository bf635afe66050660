//! Read, update and delete operations on spawned NPCs.

use std::sync::Arc;

use gangnpc_domain::{
    Accuracy, AdvancedGroupId, Armor, FactionCatalog, Health, Npc, NpcId, NpcUpdate, SpawnGroupId,
};
use gangnpc_shared::UpdateNpcRequest;

use super::NpcError;
use crate::infrastructure::ports::{
    AdvancedGroupRepo, ClockPort, NpcRepo, RepoError, SpawnGroupSummary,
};
use crate::use_cases::validation;

pub struct NpcOps {
    npcs: Arc<dyn NpcRepo>,
    groups: Arc<dyn AdvancedGroupRepo>,
    catalog: Arc<FactionCatalog>,
    clock: Arc<dyn ClockPort>,
}

impl NpcOps {
    pub fn new(
        npcs: Arc<dyn NpcRepo>,
        groups: Arc<dyn AdvancedGroupRepo>,
        catalog: Arc<FactionCatalog>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            npcs,
            groups,
            catalog,
            clock,
        }
    }

    pub async fn list(&self) -> Result<Vec<Npc>, NpcError> {
        Ok(self.npcs.list_all().await?)
    }

    pub async fn get(&self, id: NpcId) -> Result<Npc, NpcError> {
        self.npcs.get(id).await?.ok_or(NpcError::NotFound(id))
    }

    /// Apply a partial update. Stats, loadout and heading are validated
    /// before anything is written.
    pub async fn update(&self, id: NpcId, request: UpdateNpcRequest) -> Result<Npc, NpcError> {
        let update = to_update(request)?;
        let mut npc = self.get(id).await?;

        npc.apply_update(update, &self.catalog, self.clock.now())?;
        self.save(&npc).await?;

        tracing::info!(npc_id = %id, "Updated NPC");
        Ok(npc)
    }

    pub async fn delete(&self, id: NpcId) -> Result<(), NpcError> {
        if !self.npcs.delete(id).await? {
            return Err(NpcError::NotFound(id));
        }
        tracing::info!(npc_id = %id, "Deleted NPC");
        Ok(())
    }

    /// Delete every NPC. Returns how many were removed.
    pub async fn clear_all(&self) -> Result<u64, NpcError> {
        let deleted = self.npcs.delete_all().await?;
        tracing::info!(deleted, "Cleared all NPCs");
        Ok(deleted)
    }

    /// Delete the listed NPCs; unknown ids are skipped.
    pub async fn bulk_delete(&self, ids: Vec<NpcId>) -> Result<u64, NpcError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let deleted = self.npcs.delete_many(&ids).await?;
        tracing::info!(requested = ids.len(), deleted, "Bulk deleted NPCs");
        Ok(deleted)
    }

    pub async fn join_advanced_group(
        &self,
        id: NpcId,
        group_id: AdvancedGroupId,
    ) -> Result<Npc, NpcError> {
        if self.groups.get(group_id).await?.is_none() {
            return Err(NpcError::AdvancedGroupNotFound(group_id));
        }
        let mut npc = self.get(id).await?;

        npc.join_advanced_group(group_id, self.clock.now());
        self.save(&npc).await?;

        tracing::info!(npc_id = %id, advanced_group_id = %group_id, "NPC joined advanced group");
        Ok(npc)
    }

    /// Leaving when not in a group is not an error; the NPC is returned as is.
    pub async fn leave_advanced_group(&self, id: NpcId) -> Result<Npc, NpcError> {
        let mut npc = self.get(id).await?;

        if let Some(previous) = npc.leave_advanced_group(self.clock.now()) {
            self.save(&npc).await?;
            tracing::info!(npc_id = %id, advanced_group_id = %previous, "NPC left advanced group");
        }
        Ok(npc)
    }

    pub async fn list_spawn_groups(&self) -> Result<Vec<SpawnGroupSummary>, NpcError> {
        Ok(self.npcs.spawn_group_summaries().await?)
    }

    pub async fn delete_spawn_group(&self, group_id: SpawnGroupId) -> Result<u64, NpcError> {
        let deleted = self.npcs.delete_spawn_group(group_id).await?;
        if deleted == 0 {
            return Err(NpcError::SpawnGroupNotFound(group_id));
        }
        tracing::info!(spawn_group_id = %group_id, deleted, "Deleted spawn group");
        Ok(deleted)
    }

    async fn save(&self, npc: &Npc) -> Result<(), NpcError> {
        // A concurrent delete between read and write surfaces as not found
        self.npcs.save(npc).await.map_err(|e| match e {
            RepoError::NotFound { .. } => NpcError::NotFound(npc.id()),
            other => NpcError::Repo(other),
        })
    }
}

fn to_update(request: UpdateNpcRequest) -> Result<NpcUpdate, NpcError> {
    Ok(NpcUpdate {
        health: request.health.map(Health::new).transpose()?,
        armor: request.armor.map(Armor::new).transpose()?,
        accuracy: request.accuracy.map(Accuracy::new).transpose()?,
        model: request.model,
        weapon: request.weapon,
        state: request.state,
        position: request
            .position
            .map(|p| validation::position(p, "position"))
            .transpose()?,
        heading: request.heading,
        owner_ids: validation::actor_list(request.owner_ids.as_deref()),
        friendly_actor_ids: validation::actor_list(request.friendly_actor_ids.as_deref()),
        friendly_jobs: validation::token_list(request.friendly_jobs.as_deref()),
    })
}
