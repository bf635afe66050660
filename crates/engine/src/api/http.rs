//! HTTP routes.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use gangnpc_domain::{AdvancedGroupId, DomainError, NpcId, SpawnGroupId};
use gangnpc_shared::{
    AdvancedGroupResponse, ApiStatusResponse, BulkDeleteRequest, ControllableGroupData,
    ControllableNpcData, CreateAdvancedGroupRequest, FactionProfileData, GroupCommandRequest,
    GroupCommandResponse, MessageResponse, NpcCommandRequest, NpcCommandResponse, NpcResponse,
    SpawnGroupData, SpawnNpcRequest, StatsResponse, UpdateAdvancedGroupRequest, UpdateNpcRequest,
};
use uuid::Uuid;

use super::mapping;
use crate::app::App;
use crate::infrastructure::ports::RepoError;
use crate::use_cases::{AdvancedGroupError, CommandError, NpcError, StatsError};

const API_VERSION: &str = "2.0.0";

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/api", get(status))
        .route("/api/", get(status))
        .route("/api/health", get(status))
        .route("/api/gangs", get(list_gangs))
        // NPCs
        .route("/api/npc/spawn", post(spawn_npcs))
        .route("/api/npcs", get(list_npcs))
        .route("/api/npcs/clear", delete(clear_npcs))
        .route("/api/npcs/bulk-delete", post(bulk_delete_npcs))
        .route("/api/npcs/{id}", get(get_npc).put(update_npc))
        .route("/api/npc/{id}", delete(delete_npc))
        .route(
            "/api/npcs/{id}/advanced-group/{group_id}",
            put(join_advanced_group),
        )
        .route("/api/npcs/{id}/advanced-group", delete(leave_advanced_group))
        // Commands
        .route("/api/npc/command", post(command_npc))
        .route("/api/group/command", post(command_group))
        // Spawn groups
        .route("/api/groups", get(list_spawn_groups))
        .route("/api/group/{id}", delete(delete_spawn_group))
        // Advanced groups
        .route(
            "/api/advanced-groups",
            get(list_advanced_groups).post(create_advanced_group),
        )
        .route(
            "/api/advanced-groups/{id}",
            get(get_advanced_group)
                .put(update_advanced_group)
                .delete(delete_advanced_group),
        )
        .route("/api/advanced-groups/{id}/npcs", get(advanced_group_npcs))
        // Statistics and access
        .route("/api/stats", get(stats))
        .route("/api/actors/{actor_id}/npcs", get(actor_npcs))
        .route(
            "/api/actors/{actor_id}/advanced-groups",
            get(actor_advanced_groups),
        )
}

async fn status() -> Json<ApiStatusResponse> {
    Json(ApiStatusResponse {
        message: "Gang NPC Manager API".to_string(),
        status: "online".to_string(),
        version: API_VERSION.to_string(),
    })
}

async fn list_gangs(State(app): State<Arc<App>>) -> Json<BTreeMap<String, FactionProfileData>> {
    let gangs = app
        .catalog
        .profiles()
        .iter()
        .map(|(faction, profile)| (faction.as_str().to_string(), mapping::faction_profile(profile)))
        .collect();
    Json(gangs)
}

// =============================================================================
// NPCs
// =============================================================================

async fn spawn_npcs(
    State(app): State<Arc<App>>,
    payload: Result<Json<SpawnNpcRequest>, JsonRejection>,
) -> Result<Json<Vec<NpcResponse>>, ApiError> {
    let Json(request) = payload?;
    let spawned = app.use_cases.npc.spawn.execute(request).await?;
    Ok(Json(mapping::npcs(&spawned)))
}

async fn list_npcs(State(app): State<Arc<App>>) -> Result<Json<Vec<NpcResponse>>, ApiError> {
    let npcs = app.use_cases.npc.ops.list().await?;
    Ok(Json(mapping::npcs(&npcs)))
}

async fn get_npc(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<NpcResponse>, ApiError> {
    let id = NpcId::from_uuid(path_id(&id, "NPC")?);
    let npc = app.use_cases.npc.ops.get(id).await?;
    Ok(Json(mapping::npc(&npc)))
}

async fn update_npc(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateNpcRequest>, JsonRejection>,
) -> Result<Json<NpcResponse>, ApiError> {
    let id = NpcId::from_uuid(path_id(&id, "NPC")?);
    let Json(request) = payload?;
    let npc = app.use_cases.npc.ops.update(id, request).await?;
    Ok(Json(mapping::npc(&npc)))
}

async fn delete_npc(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = NpcId::from_uuid(path_id(&id, "NPC")?);
    app.use_cases.npc.ops.delete(id).await?;
    Ok(Json(MessageResponse::new("NPC deleted")))
}

async fn clear_npcs(State(app): State<Arc<App>>) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = app.use_cases.npc.ops.clear_all().await?;
    Ok(Json(MessageResponse::with_affected("All NPCs cleared", deleted)))
}

async fn bulk_delete_npcs(
    State(app): State<Arc<App>>,
    payload: Result<Json<BulkDeleteRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;
    let ids = request.npc_ids.into_iter().map(NpcId::from_uuid).collect();
    let deleted = app.use_cases.npc.ops.bulk_delete(ids).await?;
    Ok(Json(MessageResponse::with_affected("NPCs deleted", deleted)))
}

async fn join_advanced_group(
    State(app): State<Arc<App>>,
    Path((id, group_id)): Path<(String, String)>,
) -> Result<Json<NpcResponse>, ApiError> {
    let id = NpcId::from_uuid(path_id(&id, "NPC")?);
    let group_id = AdvancedGroupId::from_uuid(path_id(&group_id, "Advanced group")?);
    let npc = app.use_cases.npc.ops.join_advanced_group(id, group_id).await?;
    Ok(Json(mapping::npc(&npc)))
}

async fn leave_advanced_group(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<NpcResponse>, ApiError> {
    let id = NpcId::from_uuid(path_id(&id, "NPC")?);
    let npc = app.use_cases.npc.ops.leave_advanced_group(id).await?;
    Ok(Json(mapping::npc(&npc)))
}

// =============================================================================
// Commands
// =============================================================================

async fn command_npc(
    State(app): State<Arc<App>>,
    payload: Result<Json<NpcCommandRequest>, JsonRejection>,
) -> Result<Json<NpcCommandResponse>, ApiError> {
    let Json(request) = payload?;
    let report = app.use_cases.command.npc.execute(request).await?;
    Ok(Json(mapping::npc_command(&report)))
}

async fn command_group(
    State(app): State<Arc<App>>,
    payload: Result<Json<GroupCommandRequest>, JsonRejection>,
) -> Result<Json<GroupCommandResponse>, ApiError> {
    let Json(request) = payload?;
    let report = app.use_cases.command.group.execute(request).await?;
    Ok(Json(mapping::group_command(&report)))
}

// =============================================================================
// Spawn groups
// =============================================================================

async fn list_spawn_groups(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<SpawnGroupData>>, ApiError> {
    let groups = app.use_cases.npc.ops.list_spawn_groups().await?;
    Ok(Json(groups.iter().map(mapping::spawn_group).collect()))
}

async fn delete_spawn_group(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = SpawnGroupId::from_uuid(path_id(&id, "Spawn group")?);
    let deleted = app.use_cases.npc.ops.delete_spawn_group(id).await?;
    Ok(Json(MessageResponse::with_affected("Group deleted", deleted)))
}

// =============================================================================
// Advanced groups
// =============================================================================

async fn create_advanced_group(
    State(app): State<Arc<App>>,
    payload: Result<Json<CreateAdvancedGroupRequest>, JsonRejection>,
) -> Result<Json<AdvancedGroupResponse>, ApiError> {
    let Json(request) = payload?;
    let group = app.use_cases.advanced_group.create(request).await?;
    Ok(Json(mapping::advanced_group(&group)))
}

async fn list_advanced_groups(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<AdvancedGroupResponse>>, ApiError> {
    let groups = app.use_cases.advanced_group.list().await?;
    Ok(Json(groups.iter().map(mapping::advanced_group).collect()))
}

async fn get_advanced_group(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<AdvancedGroupResponse>, ApiError> {
    let id = AdvancedGroupId::from_uuid(path_id(&id, "Advanced group")?);
    let group = app.use_cases.advanced_group.get(id).await?;
    Ok(Json(mapping::advanced_group(&group)))
}

async fn update_advanced_group(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateAdvancedGroupRequest>, JsonRejection>,
) -> Result<Json<AdvancedGroupResponse>, ApiError> {
    let id = AdvancedGroupId::from_uuid(path_id(&id, "Advanced group")?);
    let Json(request) = payload?;
    let group = app.use_cases.advanced_group.update(id, request).await?;
    Ok(Json(mapping::advanced_group(&group)))
}

async fn delete_advanced_group(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = AdvancedGroupId::from_uuid(path_id(&id, "Advanced group")?);
    let deleted = app.use_cases.advanced_group.delete(id).await?;
    Ok(Json(MessageResponse::with_affected(
        "Advanced group deleted",
        deleted.released_npcs,
    )))
}

async fn advanced_group_npcs(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<NpcResponse>>, ApiError> {
    let id = AdvancedGroupId::from_uuid(path_id(&id, "Advanced group")?);
    let npcs = app.use_cases.advanced_group.npcs(id).await?;
    Ok(Json(mapping::npcs(&npcs)))
}

// =============================================================================
// Statistics and access
// =============================================================================

async fn stats(State(app): State<Arc<App>>) -> Result<Json<StatsResponse>, ApiError> {
    let report = app.use_cases.stats.execute().await?;
    Ok(Json(mapping::stats(report)))
}

async fn actor_npcs(
    State(app): State<Arc<App>>,
    Path(actor_id): Path<String>,
) -> Result<Json<Vec<ControllableNpcData>>, ApiError> {
    let entries = app.use_cases.command.access.controllable_npcs(&actor_id).await?;
    Ok(Json(entries.iter().map(mapping::controllable_npc).collect()))
}

async fn actor_advanced_groups(
    State(app): State<Arc<App>>,
    Path(actor_id): Path<String>,
) -> Result<Json<Vec<ControllableGroupData>>, ApiError> {
    let entries = app.use_cases.command.access.controllable_groups(&actor_id).await?;
    Ok(Json(entries.iter().map(mapping::controllable_group).collect()))
}

// =============================================================================
// Errors
// =============================================================================

/// Path ids that are not UUIDs name nothing and are reported as not found.
fn path_id(raw: &str, entity: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(format!("{} not found: {}", entity, raw)))
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Forbidden(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            _ => ApiError::BadRequest(e.to_string()),
        }
    }
}

impl From<NpcError> for ApiError {
    fn from(e: NpcError) -> Self {
        match e {
            NpcError::NotFound(_)
            | NpcError::SpawnGroupNotFound(_)
            | NpcError::AdvancedGroupNotFound(_) => ApiError::NotFound(e.to_string()),
            NpcError::Domain(e) => e.into(),
            NpcError::Repo(e) => e.into(),
        }
    }
}

impl From<CommandError> for ApiError {
    fn from(e: CommandError) -> Self {
        match e {
            CommandError::NotFound(_)
            | CommandError::UnknownNpc(_)
            | CommandError::GroupNotFound(_) => {
                ApiError::NotFound(e.to_string())
            }
            CommandError::Unauthorized { .. } => ApiError::Forbidden(e.to_string()),
            CommandError::Domain(e) => e.into(),
            CommandError::Repo(e) => e.into(),
        }
    }
}

impl From<AdvancedGroupError> for ApiError {
    fn from(e: AdvancedGroupError) -> Self {
        match e {
            AdvancedGroupError::NotFound(_) => ApiError::NotFound(e.to_string()),
            AdvancedGroupError::Domain(e) => e.into(),
            AdvancedGroupError::Repo(e) => e.into(),
        }
    }
}

impl From<StatsError> for ApiError {
    fn from(e: StatsError) -> Self {
        match e {
            StatsError::Repo(e) => e.into(),
        }
    }
}
