use gangnpc_domain::{Faction, MemberRole};
use serde::{Deserialize, Serialize};

use super::{double_option, PositionData};

/// One member entry: `{ "type": "actor_id", "value": "12", "role": "leader" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMemberData {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub role: MemberRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatrolAreaData {
    pub center: PositionData,
    pub radius: f64,
}

/// `POST /api/advanced-groups`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAdvancedGroupRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(alias = "gang")]
    pub faction: Faction,
    pub created_by: String,
    #[serde(default)]
    pub auto_defend: bool,
    #[serde(default)]
    pub auto_attack_enemies: bool,
    #[serde(default)]
    pub patrol_area: Option<PatrolAreaData>,
    #[serde(default)]
    pub members: Vec<GroupMemberData>,
}

/// `PUT /api/advanced-groups/{id}`
///
/// `"patrol_area": null` clears the area; omitting it leaves it unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateAdvancedGroupRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "gang")]
    pub faction: Option<Faction>,
    #[serde(default)]
    pub auto_defend: Option<bool>,
    #[serde(default)]
    pub auto_attack_enemies: Option<bool>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub patrol_area: Option<Option<PatrolAreaData>>,
    #[serde(default)]
    pub members: Option<Vec<GroupMemberData>>,
}
