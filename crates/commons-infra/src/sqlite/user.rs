//! SQLite user repository implementation.

use commons_core::repository::user::UserRepository;
use commons_types::error::RepositoryError;
use commons_types::user::{User, UserId};
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `UserRepository`.
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, RepositoryError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let id = id
        .parse::<UserId>()
        .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?;

    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(User {
        id,
        username: row
            .try_get("username")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        is_vouched: row
            .try_get("is_vouched")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        is_superuser: row
            .try_get("is_superuser")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        created_at: parse_datetime(&created_at)?,
    })
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO users (id, username, is_vouched, is_superuser, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(user.is_vouched)
        .bind(user.is_superuser)
        .bind(format_datetime(&user.created_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(user.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => Err(
                RepositoryError::Conflict(format!("username '{}' already exists", user.username)),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|r| user_from_row(&r)).transpose()
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|r| user_from_row(&r)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let pool = test_pool().await;
        let repo = SqliteUserRepository::new(pool);

        let user = User::vouched("jane");
        repo.create(&user).await.unwrap();

        let by_id = repo.get_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "jane");
        assert!(by_id.is_vouched);
        assert!(!by_id.is_superuser);

        let by_name = repo.get_by_username("jane").await.unwrap().unwrap();
        assert_eq!(by_name.id, user.id);

        assert!(repo.get_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_username_conflict() {
        let pool = test_pool().await;
        let repo = SqliteUserRepository::new(pool);

        repo.create(&User::vouched("taken")).await.unwrap();
        let err = repo.create(&User::vouched("taken")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }
}
