use std::collections::HashMap;
use std::sync::Arc;

use gangnpc_domain::{
    group_permission, AdvancedGroup, ControlLevel, GroupAccess, MemberRole, Npc,
};

use super::{authorize, CommandError};
use crate::infrastructure::ports::{AdvancedGroupRepo, NpcRepo};
use crate::use_cases::validation;

#[derive(Debug, Clone)]
pub struct ControllableNpc {
    pub level: ControlLevel,
    pub npc: Npc,
}

#[derive(Debug, Clone)]
pub struct ControllableGroup {
    pub role: MemberRole,
    pub level: ControlLevel,
    pub group: AdvancedGroup,
}

/// What a given actor is allowed to command.
pub struct ActorAccess {
    npcs: Arc<dyn NpcRepo>,
    groups: Arc<dyn AdvancedGroupRepo>,
}

impl ActorAccess {
    pub fn new(npcs: Arc<dyn NpcRepo>, groups: Arc<dyn AdvancedGroupRepo>) -> Self {
        Self { npcs, groups }
    }

    /// Every NPC the actor may command, directly or through its group.
    pub async fn controllable_npcs(&self, actor_id: &str) -> Result<Vec<ControllableNpc>, CommandError> {
        let actor = validation::actor(actor_id, "actor_id")?;
        let groups: HashMap<_, _> = self
            .groups
            .list()
            .await?
            .into_iter()
            .map(|g| (g.id(), g))
            .collect();

        let controllable = self
            .npcs
            .list_all()
            .await?
            .into_iter()
            .filter_map(|npc| {
                let group = npc.advanced_group_id().and_then(|id| groups.get(&id));
                let decision = authorize(&npc, group, &actor);
                decision.allowed.then_some(ControllableNpc {
                    level: decision.level,
                    npc,
                })
            })
            .collect();
        Ok(controllable)
    }

    /// Advanced groups whose member list grants the actor control.
    pub async fn controllable_groups(
        &self,
        actor_id: &str,
    ) -> Result<Vec<ControllableGroup>, CommandError> {
        let actor = validation::actor(actor_id, "actor_id")?;

        let controllable = self
            .groups
            .list()
            .await?
            .into_iter()
            .filter_map(|group| match group_permission(&group, &actor) {
                GroupAccess::Granted { role, level } => {
                    Some(ControllableGroup { role, level, group })
                }
                _ => None,
            })
            .collect();
        Ok(controllable)
    }
}
