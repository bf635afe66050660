//! Read models returned by repository ports.

use chrono::{DateTime, Utc};
use gangnpc_domain::{Faction, SpawnGroupId};

/// Aggregate view of one spawn group, derived from its member NPCs.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnGroupSummary {
    pub id: SpawnGroupId,
    /// Faction of the earliest-created member.
    pub faction: Faction,
    pub member_count: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactionCount {
    pub faction: Faction,
    pub count: u64,
}
