//! Gang NPC Manager Shared - wire types for the REST API
//!
//! This crate contains the request and response bodies exchanged with the
//! admin UI and the game-server script:
//! - Request DTOs (`requests`)
//! - Response DTOs (`responses`)
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, uuid, serde_json and the domain vocabulary
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No domain IDs** - use raw `uuid::Uuid` in DTOs
//! 4. **Raw values in requests** - range checks happen in the engine so they
//!    report as validation errors, not as decode failures

pub mod requests;
pub mod responses;

pub use requests::{
    BulkDeleteRequest, CreateAdvancedGroupRequest, GroupCommandRequest, GroupMemberData,
    NpcCommandRequest, PatrolAreaData, PositionData, SpawnNpcRequest, UpdateAdvancedGroupRequest,
    UpdateNpcRequest, MAX_SPAWN_QUANTITY,
};
pub use responses::{
    AdvancedGroupResponse, ApiStatusResponse, CommandStatus, ControllableGroupData,
    ControllableNpcData, FactionProfileData, GroupCommandResponse, MessageResponse,
    NpcCommandResponse, NpcResponse, SpawnGroupData, StatsResponse, TargetData,
};
