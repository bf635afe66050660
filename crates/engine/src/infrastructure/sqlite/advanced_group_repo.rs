//! SQLite-backed advanced group storage.

use async_trait::async_trait;
use gangnpc_domain::{AdvancedGroup, AdvancedGroupId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::{count_to_u64, timestamp};
use crate::infrastructure::ports::{AdvancedGroupRepo, RepoError};

pub struct SqliteAdvancedGroupRepo {
    pool: SqlitePool,
}

impl SqliteAdvancedGroupRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn decode(row: &SqliteRow) -> Result<AdvancedGroup, RepoError> {
    let json: String = row
        .try_get("document")
        .map_err(|e| RepoError::database("advanced_group_decode", e))?;
    serde_json::from_str(&json).map_err(|e| RepoError::serialization(e.to_string()))
}

#[async_trait]
impl AdvancedGroupRepo for SqliteAdvancedGroupRepo {
    async fn get(&self, id: AdvancedGroupId) -> Result<Option<AdvancedGroup>, RepoError> {
        let row = sqlx::query("SELECT document FROM advanced_groups WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("advanced_group_get", e))?;

        row.as_ref().map(decode).transpose()
    }

    async fn list(&self) -> Result<Vec<AdvancedGroup>, RepoError> {
        let rows = sqlx::query("SELECT document FROM advanced_groups ORDER BY created_at, rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("advanced_group_list", e))?;

        rows.iter().map(decode).collect()
    }

    async fn save(&self, group: &AdvancedGroup) -> Result<(), RepoError> {
        let document =
            serde_json::to_string(group).map_err(|e| RepoError::serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO advanced_groups (id, faction, created_at, updated_at, document)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                faction = excluded.faction,
                updated_at = excluded.updated_at,
                document = excluded.document
            "#,
        )
        .bind(group.id().to_string())
        .bind(group.faction().as_str())
        .bind(timestamp(group.created_at()))
        .bind(timestamp(group.updated_at()))
        .bind(document)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("advanced_group_save", e))?;

        Ok(())
    }

    async fn delete(&self, id: AdvancedGroupId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM advanced_groups WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("advanced_group_delete", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM advanced_groups")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("advanced_group_count", e))?;
        let count: i64 = row
            .try_get("count")
            .map_err(|e| RepoError::database("advanced_group_count", e))?;
        Ok(count_to_u64(count))
    }
}
