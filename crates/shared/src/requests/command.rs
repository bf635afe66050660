use serde::{Deserialize, Serialize};

use super::PositionData;

/// `POST /api/npc/command`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcCommandRequest {
    /// UUID of the NPC. Anything else names no NPC.
    pub npc_id: String,
    /// Verb such as `follow` or `guard`. Unknown verbs are accepted and ignored.
    pub command: String,
    /// The actor issuing the command.
    pub actor_id: String,
    /// Actor to attack.
    #[serde(default)]
    pub target_id: Option<String>,
    #[serde(default)]
    pub position: Option<PositionData>,
    #[serde(default)]
    pub patrol_route: Option<Vec<PositionData>>,
}

/// `POST /api/group/command`
///
/// `group_id` may be a spawn-group id or an advanced-group id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCommandRequest {
    pub group_id: String,
    pub command: String,
    pub actor_id: String,
}
