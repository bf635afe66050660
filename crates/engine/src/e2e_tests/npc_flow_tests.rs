//! Spawning, listing, updating and deleting NPCs over HTTP.

use axum::http::StatusCode;
use serde_json::json;

use super::{id_of, TestEngine};

#[tokio::test]
async fn status_endpoint_reports_online() {
    let engine = TestEngine::start().await;

    let (status, body) = engine.get("/api/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "online");
    assert_eq!(body["message"], "Gang NPC Manager API");

    let (status, _) = engine.get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn gangs_endpoint_lists_catalog() {
    let engine = TestEngine::start().await;

    let (status, body) = engine.get("/api/gangs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grove_street"]["name"], "Grove Street Families");
    assert_eq!(body.as_object().map(|m| m.len()), Some(6));
}

#[tokio::test]
async fn line_spawn_of_five_shares_one_group() {
    let engine = TestEngine::start().await;

    let spawned = engine
        .spawn(json!({
            "gang": "grove_street",
            "position": { "x": 100.0, "y": 200.0, "z": 30.0 },
            "quantity": 5,
            "formation": "line",
        }))
        .await;

    assert_eq!(spawned.len(), 5);
    let group_id = spawned[0]["spawn_group_id"].clone();
    assert!(group_id.is_string());
    for (i, npc) in spawned.iter().enumerate() {
        assert_eq!(npc["position"]["x"].as_f64(), Some(100.0 + (i as f64 - 2.5) * 2.0));
        assert_eq!(npc["position"]["y"].as_f64(), Some(200.0));
        assert_eq!(npc["position"]["z"].as_f64(), Some(30.0));
        assert_eq!(npc["spawn_group_id"], group_id);
        assert_eq!(npc["model"], "g_m_y_famca_01");
        assert_eq!(npc["state"], "idle");
    }

    let (status, groups) = engine.get("/api/groups").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(groups[0]["group_id"], group_id);
    assert_eq!(groups[0]["member_count"], 5);
    assert_eq!(groups[0]["faction"], "grove_street");

    let (_, stats) = engine.get("/api/stats").await;
    assert_eq!(stats["total_npcs"], 5);
    assert_eq!(stats["spawn_groups"], 1);
    assert_eq!(stats["faction_distribution"]["grove_street"], 5);
}

#[tokio::test]
async fn single_spawn_from_vector_text_has_no_group() {
    let engine = TestEngine::start().await;

    let spawned = engine
        .spawn(json!({
            "faction": "vagos",
            "vec3_input": "vector3(-12.5, 40, 7)",
            "formation": "line",
        }))
        .await;

    assert_eq!(spawned.len(), 1);
    assert!(spawned[0]["spawn_group_id"].is_null());
    assert_eq!(spawned[0]["position"]["x"].as_f64(), Some(-12.5 - 1.0));
}

#[tokio::test]
async fn invalid_spawns_are_rejected_without_side_effects() {
    let engine = TestEngine::start().await;
    let at_origin = json!({ "x": 0.0, "y": 0.0, "z": 0.0 });

    let (status, body) = engine
        .post(
            "/api/npc/spawn",
            json!({ "faction": "ballas", "position": at_origin, "quantity": 21 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap_or_default().contains("Quantity"));

    let (status, _) = engine
        .post(
            "/api/npc/spawn",
            json!({ "faction": "ballas", "position": at_origin, "weapon": "WEAPON_ASSAULTRIFLE" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = engine
        .post("/api/npc/spawn", json!({ "faction": "cops", "position": at_origin }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = engine
        .post(
            "/api/npc/spawn",
            json!({
                "faction": "ballas",
                "position": at_origin,
                "advanced_group_id": "00000000-0000-0000-0000-000000000001",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, npcs) = engine.get("/api/npcs").await;
    assert_eq!(npcs.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn health_update_out_of_range_leaves_npc_unchanged() {
    let engine = TestEngine::start().await;
    let npc = engine.spawn_owned("lost_mc", "1").await;
    let uri = format!("/api/npcs/{}", id_of(&npc));

    let (status, _) = engine.put(&uri, json!({ "health": 250 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, stored) = engine.get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["health"], 100);
}

#[tokio::test]
async fn update_applies_fields_and_replaces_lists() {
    let engine = TestEngine::start().await;
    let npc = engine.spawn_owned("triads", "1, 2").await;
    let uri = format!("/api/npcs/{}", id_of(&npc));

    let (status, updated) = engine
        .put(
            &uri,
            json!({
                "health": 180,
                "weapon": "WEAPON_SWITCHBLADE",
                "state": "guarding",
                "owner_ids": "",
                "friendly_jobs": "police, ems",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["health"], 180);
    assert_eq!(updated["weapon"], "WEAPON_SWITCHBLADE");
    assert_eq!(updated["state"], "guarding");
    assert_eq!(updated["owner_ids"], json!([]));
    assert_eq!(updated["friendly_jobs"], json!(["police", "ems"]));
}

#[tokio::test]
async fn malformed_body_and_unknown_ids() {
    let engine = TestEngine::start().await;
    let npc = engine.spawn_owned("ballas", "1").await;

    let (status, _) = engine
        .put(&format!("/api/npcs/{}", id_of(&npc)), json!({ "health": "lots" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = "/api/npcs/00000000-0000-0000-0000-000000000001";
    assert_eq!(engine.get(missing).await.0, StatusCode::NOT_FOUND);
    assert_eq!(
        engine.put(missing, json!({ "health": 50 })).await.0,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn non_uuid_ids_are_not_found_with_detail() {
    let engine = TestEngine::start().await;

    for (status, body) in [
        engine.get("/api/npcs/abc").await,
        engine.delete("/api/npc/abc").await,
        engine.put("/api/npcs/abc", json!({ "health": 50 })).await,
        engine.get("/api/advanced-groups/abc").await,
    ] {
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["detail"].as_str().unwrap_or_default().ends_with("not found: abc"));
    }
}

#[tokio::test]
async fn delete_endpoints_remove_documents() {
    let engine = TestEngine::start().await;
    let first = engine.spawn_owned("ballas", "1").await;
    let second = engine.spawn_owned("ballas", "1").await;
    let third = engine.spawn_owned("vagos", "1").await;

    let (status, _) = engine.delete(&format!("/api/npc/{}", id_of(&first))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = engine.delete(&format!("/api/npc/{}", id_of(&first))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = engine
        .post(
            "/api/npcs/bulk-delete",
            json!({ "npc_ids": [id_of(&second), id_of(&first)] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected"], 1);

    let (status, body) = engine.delete("/api/npcs/clear").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected"], 1);
    assert_eq!(
        engine.get(&format!("/api/npcs/{}", id_of(&third))).await.0,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn spawn_group_delete_removes_members() {
    let engine = TestEngine::start().await;
    let spawned = engine
        .spawn(json!({
            "faction": "armenian_mafia",
            "position": { "x": 0.0, "y": 0.0, "z": 0.0 },
            "quantity": 3,
            "formation": "square",
        }))
        .await;
    let group_id = spawned[0]["spawn_group_id"]
        .as_str()
        .expect("group id")
        .to_string();

    let (status, body) = engine.delete(&format!("/api/group/{group_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected"], 3);

    let (status, _) = engine.delete(&format!("/api/group/{group_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
