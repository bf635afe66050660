//! Request bodies.

mod advanced_group;
mod command;
mod npc;

pub use advanced_group::{
    CreateAdvancedGroupRequest, GroupMemberData, PatrolAreaData, UpdateAdvancedGroupRequest,
};
pub use command::{GroupCommandRequest, NpcCommandRequest};
pub use npc::{BulkDeleteRequest, SpawnNpcRequest, UpdateNpcRequest, MAX_SPAWN_QUANTITY};

use serde::{Deserialize, Deserializer, Serialize};

/// A position on the wire: `{ "x": .., "y": .., "z": .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionData {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
