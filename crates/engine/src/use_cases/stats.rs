//! Dashboard statistics.

use std::sync::Arc;

use crate::infrastructure::ports::{AdvancedGroupRepo, FactionCount, NpcRepo, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsReport {
    pub total_npcs: u64,
    pub spawn_groups: u64,
    pub advanced_groups: u64,
    /// Only factions with at least one NPC appear.
    pub faction_distribution: Vec<FactionCount>,
}

pub struct StatsOps {
    npcs: Arc<dyn NpcRepo>,
    groups: Arc<dyn AdvancedGroupRepo>,
}

impl StatsOps {
    pub fn new(npcs: Arc<dyn NpcRepo>, groups: Arc<dyn AdvancedGroupRepo>) -> Self {
        Self { npcs, groups }
    }

    pub async fn execute(&self) -> Result<StatsReport, StatsError> {
        let total_npcs = self.npcs.count().await?;
        let spawn_groups = self.npcs.spawn_group_summaries().await?.len() as u64;
        let advanced_groups = self.groups.count().await?;
        let faction_distribution = self.npcs.faction_distribution().await?;

        Ok(StatsReport {
            total_npcs,
            spawn_groups,
            advanced_groups,
            faction_distribution,
        })
    }
}
