//! Response bodies.

use std::collections::BTreeMap;

use gangnpc_domain::{ControlLevel, Faction, MemberRole, NpcState};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::requests::{GroupMemberData, PatrolAreaData, PositionData};

/// `GET /api`, `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatusResponse {
    pub message: String,
    pub status: String,
    pub version: String,
}

/// Plain acknowledgement, with a count for bulk operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected: Option<u64>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            affected: None,
        }
    }

    pub fn with_affected(message: impl Into<String>, affected: u64) -> Self {
        Self {
            message: message.into(),
            affected: Some(affected),
        }
    }
}

/// `GET /api/gangs` values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionProfileData {
    pub name: String,
    pub color: String,
    pub models: Vec<String>,
    pub weapons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetData {
    Actor { actor_id: String },
    Position { x: f64, y: f64, z: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcResponse {
    pub id: Uuid,
    pub faction: Faction,
    pub model: String,
    pub weapon: String,
    pub position: PositionData,
    pub heading: f64,
    pub state: NpcState,
    pub health: u8,
    pub armor: u8,
    pub accuracy: u8,
    pub spawn_group_id: Option<Uuid>,
    pub advanced_group_id: Option<Uuid>,
    pub owner_ids: Vec<String>,
    pub friendly_actor_ids: Vec<String>,
    pub friendly_jobs: Vec<String>,
    pub patrol_route: Vec<PositionData>,
    pub guard_position: Option<PositionData>,
    pub target: Option<TargetData>,
    pub last_command: Option<String>,
    pub last_command_by: Option<String>,
    /// RFC 3339
    pub created_at: String,
    /// RFC 3339
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Applied,
    /// The verb was not recognized; nothing changed.
    Ignored,
}

/// `POST /api/npc/command`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcCommandResponse {
    pub npc_id: Uuid,
    pub command: String,
    pub status: CommandStatus,
    pub previous_state: NpcState,
    pub state: NpcState,
    pub message: String,
}

/// `POST /api/group/command`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCommandResponse {
    pub group_id: Uuid,
    pub command: String,
    pub status: CommandStatus,
    /// NPCs found under the group key.
    pub matched: usize,
    /// Members the issuer may command (and that received the command if applied).
    pub authorized: usize,
    /// Members skipped for lack of permission.
    pub unauthorized: usize,
    /// Authorized members deleted before the command was saved.
    pub vanished: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedGroupResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub faction: Faction,
    pub created_by: String,
    pub auto_defend: bool,
    pub auto_attack_enemies: bool,
    pub patrol_area: Option<PatrolAreaData>,
    pub members: Vec<GroupMemberData>,
    pub created_at: String,
    pub updated_at: String,
}

/// `GET /api/groups` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnGroupData {
    pub group_id: Uuid,
    pub faction: Faction,
    pub member_count: u64,
    pub created_at: String,
}

/// `GET /api/stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_npcs: u64,
    pub spawn_groups: u64,
    pub advanced_groups: u64,
    /// Faction tag -> NPC count. Factions without NPCs are omitted.
    pub faction_distribution: BTreeMap<String, u64>,
}

/// `GET /api/actors/{actor_id}/npcs` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllableNpcData {
    pub level: ControlLevel,
    pub npc: NpcResponse,
}

/// `GET /api/actors/{actor_id}/advanced-groups` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllableGroupData {
    pub role: MemberRole,
    pub level: ControlLevel,
    pub group: AdvancedGroupResponse,
}
