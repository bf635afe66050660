//! Advanced group use cases.
//!
//! Advanced groups are durable, named groupings with a member list that can
//! grant control over the NPCs assigned to them.

use std::sync::Arc;

use gangnpc_domain::{
    AdvancedGroup, AdvancedGroupId, AdvancedGroupUpdate, Description, DomainError, GroupName, Npc,
};
use gangnpc_shared::{CreateAdvancedGroupRequest, UpdateAdvancedGroupRequest};

use crate::infrastructure::ports::{AdvancedGroupRepo, ClockPort, NpcRepo, RepoError};
use crate::use_cases::validation;

#[derive(Debug, thiserror::Error)]
pub enum AdvancedGroupError {
    #[error("Advanced group not found: {0}")]
    NotFound(AdvancedGroupId),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Result of deleting a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletedGroup {
    pub id: AdvancedGroupId,
    /// NPCs whose reference to the group was cleared.
    pub released_npcs: u64,
}

pub struct AdvancedGroupOps {
    groups: Arc<dyn AdvancedGroupRepo>,
    npcs: Arc<dyn NpcRepo>,
    clock: Arc<dyn ClockPort>,
}

impl AdvancedGroupOps {
    pub fn new(
        groups: Arc<dyn AdvancedGroupRepo>,
        npcs: Arc<dyn NpcRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            groups,
            npcs,
            clock,
        }
    }

    pub async fn create(
        &self,
        request: CreateAdvancedGroupRequest,
    ) -> Result<AdvancedGroup, AdvancedGroupError> {
        let name = GroupName::new(request.name)?;
        let description = match request.description {
            Some(text) => Description::new(text)?,
            None => Description::empty(),
        };
        let created_by = validation::actor(&request.created_by, "created_by")?;
        let patrol_area = request.patrol_area.map(validation::patrol_area).transpose()?;
        let members = validation::members(request.members)?;

        let mut group = AdvancedGroup::new(name, request.faction, created_by, self.clock.now())
            .with_description(description)
            .with_auto_defend(request.auto_defend)
            .with_auto_attack_enemies(request.auto_attack_enemies)
            .with_members(members);
        if let Some(area) = patrol_area {
            group = group.with_patrol_area(area);
        }

        self.groups.save(&group).await?;
        tracing::info!(
            advanced_group_id = %group.id(),
            name = %group.name().as_str(),
            faction = %group.faction(),
            "Created advanced group"
        );
        Ok(group)
    }

    pub async fn list(&self) -> Result<Vec<AdvancedGroup>, AdvancedGroupError> {
        Ok(self.groups.list().await?)
    }

    pub async fn get(&self, id: AdvancedGroupId) -> Result<AdvancedGroup, AdvancedGroupError> {
        self.groups
            .get(id)
            .await?
            .ok_or(AdvancedGroupError::NotFound(id))
    }

    pub async fn update(
        &self,
        id: AdvancedGroupId,
        request: UpdateAdvancedGroupRequest,
    ) -> Result<AdvancedGroup, AdvancedGroupError> {
        let update = to_update(request)?;
        let mut group = self.get(id).await?;

        group.apply_update(update, self.clock.now());
        self.groups.save(&group).await?;

        tracing::info!(advanced_group_id = %id, "Updated advanced group");
        Ok(group)
    }

    /// Delete the group and drop the reference from every NPC assigned to
    /// it. The NPCs themselves stay.
    pub async fn delete(&self, id: AdvancedGroupId) -> Result<DeletedGroup, AdvancedGroupError> {
        self.get(id).await?;

        let released_npcs = self.npcs.clear_advanced_group(id, self.clock.now()).await?;
        if !self.groups.delete(id).await? {
            return Err(AdvancedGroupError::NotFound(id));
        }

        tracing::info!(advanced_group_id = %id, released_npcs, "Deleted advanced group");
        Ok(DeletedGroup { id, released_npcs })
    }

    /// NPCs currently assigned to the group.
    pub async fn npcs(&self, id: AdvancedGroupId) -> Result<Vec<Npc>, AdvancedGroupError> {
        self.get(id).await?;
        Ok(self.npcs.list_by_advanced_group(id).await?)
    }
}

fn to_update(request: UpdateAdvancedGroupRequest) -> Result<AdvancedGroupUpdate, DomainError> {
    Ok(AdvancedGroupUpdate {
        name: request.name.map(GroupName::new).transpose()?,
        description: request.description.map(Description::new).transpose()?,
        faction: request.faction,
        auto_defend: request.auto_defend,
        auto_attack_enemies: request.auto_attack_enemies,
        patrol_area: request
            .patrol_area
            .map(|area| area.map(validation::patrol_area).transpose())
            .transpose()?,
        members: request.members.map(validation::members).transpose()?,
    })
}
