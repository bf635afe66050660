//! SQLite-backed NPC document storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gangnpc_domain::{AdvancedGroupId, Faction, Npc, NpcId, SpawnGroupId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{count_to_u64, parse_timestamp, timestamp};
use crate::infrastructure::ports::{FactionCount, NpcRepo, RepoError, SpawnGroupSummary};

pub struct SqliteNpcRepo {
    pool: SqlitePool,
}

impl SqliteNpcRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_documents(
        &self,
        operation: &'static str,
        sql: &str,
        binds: &[String],
    ) -> Result<Vec<Npc>, RepoError> {
        let mut query = sqlx::query(sql);
        for value in binds {
            query = query.bind(value.as_str());
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database(operation, e))?;

        rows.iter().map(decode).collect()
    }
}

fn decode(row: &SqliteRow) -> Result<Npc, RepoError> {
    let json: String = row
        .try_get("document")
        .map_err(|e| RepoError::database("npc_decode", e))?;
    serde_json::from_str(&json).map_err(|e| RepoError::serialization(e.to_string()))
}

fn encode(npc: &Npc) -> Result<String, RepoError> {
    serde_json::to_string(npc).map_err(|e| RepoError::serialization(e.to_string()))
}

fn optional_key<T: ToString>(key: Option<T>) -> Option<String> {
    key.map(|k| k.to_string())
}

#[async_trait]
impl NpcRepo for SqliteNpcRepo {
    async fn get(&self, id: NpcId) -> Result<Option<Npc>, RepoError> {
        let row = sqlx::query("SELECT document FROM npcs WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("npc_get", e))?;

        row.as_ref().map(decode).transpose()
    }

    async fn insert(&self, npc: &Npc) -> Result<(), RepoError> {
        let document = encode(npc)?;
        sqlx::query(
            r#"
            INSERT INTO npcs (id, faction, spawn_group_id, advanced_group_id, created_at, document)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(npc.id().to_string())
        .bind(npc.faction().as_str())
        .bind(optional_key(npc.spawn_group_id()))
        .bind(optional_key(npc.advanced_group_id()))
        .bind(timestamp(npc.created_at()))
        .bind(document)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::constraint(format!("NPC {} already exists", npc.id()))
            }
            other => RepoError::database("npc_insert", other),
        })?;
        Ok(())
    }

    async fn save(&self, npc: &Npc) -> Result<(), RepoError> {
        let document = encode(npc)?;
        let result = sqlx::query(
            r#"
            UPDATE npcs
            SET faction = ?, spawn_group_id = ?, advanced_group_id = ?, document = ?
            WHERE id = ?
            "#,
        )
        .bind(npc.faction().as_str())
        .bind(optional_key(npc.spawn_group_id()))
        .bind(optional_key(npc.advanced_group_id()))
        .bind(document)
        .bind(npc.id().to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("npc_save", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Npc", npc.id()));
        }
        Ok(())
    }

    async fn delete(&self, id: NpcId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM npcs WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("npc_delete", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> Result<Vec<Npc>, RepoError> {
        self.fetch_documents(
            "npc_list_all",
            "SELECT document FROM npcs ORDER BY created_at, rowid",
            &[],
        )
        .await
    }

    async fn list_by_group_key(&self, key: Uuid) -> Result<Vec<Npc>, RepoError> {
        let key = key.to_string();
        self.fetch_documents(
            "npc_list_by_group_key",
            r#"
            SELECT document FROM npcs
            WHERE spawn_group_id = ? OR advanced_group_id = ?
            ORDER BY created_at, rowid
            "#,
            &[key.clone(), key],
        )
        .await
    }

    async fn list_by_advanced_group(
        &self,
        group_id: AdvancedGroupId,
    ) -> Result<Vec<Npc>, RepoError> {
        self.fetch_documents(
            "npc_list_by_advanced_group",
            "SELECT document FROM npcs WHERE advanced_group_id = ? ORDER BY created_at, rowid",
            &[group_id.to_string()],
        )
        .await
    }

    async fn delete_many(&self, ids: &[NpcId]) -> Result<u64, RepoError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("DELETE FROM npcs WHERE id IN ({placeholders})");
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id.to_string());
        }

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("npc_delete_many", e))?;
        Ok(result.rows_affected())
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let result = sqlx::query("DELETE FROM npcs")
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("npc_delete_all", e))?;
        Ok(result.rows_affected())
    }

    async fn delete_spawn_group(&self, group_id: SpawnGroupId) -> Result<u64, RepoError> {
        let result = sqlx::query("DELETE FROM npcs WHERE spawn_group_id = ?")
            .bind(group_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("npc_delete_spawn_group", e))?;
        Ok(result.rows_affected())
    }

    async fn clear_advanced_group(
        &self,
        group_id: AdvancedGroupId,
        now: DateTime<Utc>,
    ) -> Result<u64, RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE npcs
            SET advanced_group_id = NULL,
                document = json_set(document, '$.advanced_group_id', NULL, '$.updated_at', ?)
            WHERE advanced_group_id = ?
            "#,
        )
        .bind(timestamp(now))
        .bind(group_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("npc_clear_advanced_group", e))?;
        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM npcs")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("npc_count", e))?;
        let count: i64 = row
            .try_get("count")
            .map_err(|e| RepoError::database("npc_count", e))?;
        Ok(count_to_u64(count))
    }

    async fn faction_distribution(&self) -> Result<Vec<FactionCount>, RepoError> {
        let rows = sqlx::query(
            "SELECT faction, COUNT(*) AS count FROM npcs GROUP BY faction ORDER BY faction",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("npc_faction_distribution", e))?;

        rows.iter()
            .map(|row| {
                let faction: String = row
                    .try_get("faction")
                    .map_err(|e| RepoError::database("npc_faction_distribution", e))?;
                let count: i64 = row
                    .try_get("count")
                    .map_err(|e| RepoError::database("npc_faction_distribution", e))?;
                Ok(FactionCount {
                    faction: parse_faction(&faction)?,
                    count: count_to_u64(count),
                })
            })
            .collect()
    }

    async fn spawn_group_summaries(&self) -> Result<Vec<SpawnGroupSummary>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT
                n.spawn_group_id AS group_id,
                COUNT(*) AS member_count,
                MIN(n.created_at) AS created_at,
                (
                    SELECT f.faction FROM npcs f
                    WHERE f.spawn_group_id = n.spawn_group_id
                    ORDER BY f.created_at, f.rowid
                    LIMIT 1
                ) AS faction
            FROM npcs n
            WHERE n.spawn_group_id IS NOT NULL
            GROUP BY n.spawn_group_id
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("npc_spawn_group_summaries", e))?;

        rows.iter().map(decode_summary).collect()
    }
}

fn parse_faction(raw: &str) -> Result<Faction, RepoError> {
    raw.parse()
        .map_err(|e: gangnpc_domain::DomainError| RepoError::serialization(e.to_string()))
}

fn decode_summary(row: &SqliteRow) -> Result<SpawnGroupSummary, RepoError> {
    let column = |e: sqlx::Error| RepoError::database("npc_spawn_group_summaries", e);

    let group_id: String = row.try_get("group_id").map_err(column)?;
    let member_count: i64 = row.try_get("member_count").map_err(column)?;
    let created_at: String = row.try_get("created_at").map_err(column)?;
    let faction: String = row.try_get("faction").map_err(column)?;

    let id = Uuid::parse_str(&group_id)
        .map_err(|e| RepoError::serialization(format!("bad spawn group id {group_id}: {e}")))?;

    Ok(SpawnGroupSummary {
        id: SpawnGroupId::from_uuid(id),
        faction: parse_faction(&faction)?,
        member_count: count_to_u64(member_count),
        created_at: parse_timestamp(&created_at)?,
    })
}
