//! SQLite group alias lookup implementation.
//!
//! Read side only; alias rows are written inside `SqliteGroupRepository`
//! transactions.

use commons_core::repository::alias::GroupAliasRepository;
use commons_types::error::RepositoryError;
use commons_types::group::GroupId;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `GroupAliasRepository`.
pub struct SqliteGroupAliasRepository {
    pool: DatabasePool,
}

impl SqliteGroupAliasRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl GroupAliasRepository for SqliteGroupAliasRepository {
    async fn resolve_url(&self, url: &str) -> Result<Option<GroupId>, RepositoryError> {
        let row = sqlx::query("SELECT group_id FROM group_aliases WHERE url = ?")
            .bind(url)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let id: String = row
                    .try_get("group_id")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                let id = id
                    .parse::<GroupId>()
                    .map_err(|e| RepositoryError::Query(format!("invalid group id: {e}")))?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }
}
