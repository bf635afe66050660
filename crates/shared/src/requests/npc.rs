use gangnpc_domain::{Faction, Formation, NpcState};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PositionData;

/// Upper bound on NPCs created by one spawn request.
pub const MAX_SPAWN_QUANTITY: i64 = 20;

fn default_quantity() -> i64 {
    1
}

/// `POST /api/npc/spawn`
///
/// Permission lists are comma-separated free text, e.g. `"12, 15"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnNpcRequest {
    #[serde(alias = "gang")]
    pub faction: Faction,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub weapon: Option<String>,
    #[serde(default)]
    pub position: Option<PositionData>,
    /// Free-form vector text pasted from the game (`vector3(1.0, 2.0, 3.0)`).
    #[serde(default)]
    pub vec3_input: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub formation: Formation,
    #[serde(default)]
    pub heading: Option<f64>,
    #[serde(default)]
    pub health: Option<i64>,
    #[serde(default)]
    pub armor: Option<i64>,
    #[serde(default)]
    pub accuracy: Option<i64>,
    #[serde(default)]
    pub owner_ids: Option<String>,
    #[serde(default, alias = "friendly_player_ids")]
    pub friendly_actor_ids: Option<String>,
    #[serde(default)]
    pub friendly_jobs: Option<String>,
    #[serde(default)]
    pub advanced_group_id: Option<Uuid>,
}

impl SpawnNpcRequest {
    pub fn new(faction: Faction) -> Self {
        Self {
            faction,
            model: None,
            weapon: None,
            position: None,
            vec3_input: None,
            quantity: default_quantity(),
            formation: Formation::default(),
            heading: None,
            health: None,
            armor: None,
            accuracy: None,
            owner_ids: None,
            friendly_actor_ids: None,
            friendly_jobs: None,
            advanced_group_id: None,
        }
    }
}

/// `PUT /api/npcs/{id}` - every field optional; a present list replaces the old one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateNpcRequest {
    #[serde(default)]
    pub health: Option<i64>,
    #[serde(default)]
    pub armor: Option<i64>,
    #[serde(default)]
    pub accuracy: Option<i64>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub weapon: Option<String>,
    #[serde(default)]
    pub state: Option<NpcState>,
    #[serde(default)]
    pub position: Option<PositionData>,
    #[serde(default)]
    pub heading: Option<f64>,
    #[serde(default)]
    pub owner_ids: Option<String>,
    #[serde(default, alias = "friendly_player_ids")]
    pub friendly_actor_ids: Option<String>,
    #[serde(default)]
    pub friendly_jobs: Option<String>,
}

/// `POST /api/npcs/bulk-delete`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    pub npc_ids: Vec<Uuid>,
}
