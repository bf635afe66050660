//! SQLite document store.
//!
//! Each aggregate is stored as one JSON document, next to a handful of
//! indexed key columns used for filtering. The document is the source of
//! truth; key columns are rewritten from it on every save.

mod advanced_group_repo;
mod connection;
mod npc_repo;

pub use advanced_group_repo::SqliteAdvancedGroupRepo;
pub use connection::SqliteDatabase;
pub use npc_repo::SqliteNpcRepo;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::infrastructure::ports::RepoError;

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
pub(crate) fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| RepoError::serialization(format!("bad timestamp {raw}: {e}")))
}

pub(crate) fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}
