//! SQLite skill repository implementation.
//!
//! Skills mirror groups minus the editable attributes. The listing count
//! joins through users and only tallies vouched members; unvouched edges stay
//! in the table but never surface in the directory.

use commons_core::repository::skill::{SkillListing, SkillRepository};
use commons_core::repository::{DirectoryFilter, DirectoryOrder, SortOrder};
use commons_types::error::RepositoryError;
use commons_types::skill::{Skill, SkillId};
use commons_types::user::UserId;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `SkillRepository`.
pub struct SqliteSkillRepository {
    pool: DatabasePool,
}

impl SqliteSkillRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn skill_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Skill, RepositoryError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let id = id
        .parse::<SkillId>()
        .map_err(|e| RepositoryError::Query(format!("invalid skill id: {e}")))?;

    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(Skill {
        id,
        url: row
            .try_get("url")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        name: row
            .try_get("name")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        created_at: parse_datetime(&created_at)?,
    })
}

fn order_clause(filter: &DirectoryFilter) -> String {
    let field = match filter.order_by {
        DirectoryOrder::Id => "s.id",
        DirectoryOrder::Name => "s.name",
        DirectoryOrder::MemberCount => "number_of_members",
    };
    let direction = match filter.order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    format!(" ORDER BY {field} {direction}")
}

impl SkillRepository for SqliteSkillRepository {
    async fn create(&self, skill: &Skill) -> Result<Skill, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO skills (id, url, name, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(skill.id.to_string())
        .bind(&skill.url)
        .bind(&skill.name)
        .bind(format_datetime(&skill.created_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(skill.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => Err(
                RepositoryError::Conflict(format!("name '{}' already exists", skill.name)),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_by_url(&self, url: &str) -> Result<Option<Skill>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM skills WHERE url = ?")
            .bind(url)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|r| skill_from_row(&r)).transpose()
    }

    async fn add_member(&self, skill: &SkillId, user: &UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO skill_memberships (skill_id, user_id) VALUES (?, ?)",
        )
        .bind(skill.to_string())
        .bind(user.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_member(&self, skill: &SkillId, user: &UserId) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("DELETE FROM skill_memberships WHERE skill_id = ? AND user_id = ?")
                .bind(skill.to_string())
                .bind(user.to_string())
                .execute(&self.pool.writer)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_member(&self, skill: &SkillId, user: &UserId) -> Result<bool, RepositoryError> {
        let row =
            sqlx::query("SELECT 1 FROM skill_memberships WHERE skill_id = ? AND user_id = ?")
                .bind(skill.to_string())
                .bind(user.to_string())
                .fetch_optional(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(row.is_some())
    }

    async fn list_with_member_counts(
        &self,
        filter: &DirectoryFilter,
    ) -> Result<Vec<SkillListing>, RepositoryError> {
        // Inner joins do double duty: they drop skills with no members and
        // restrict the count to vouched users.
        let mut sql = String::from(
            "SELECT s.id, s.name, COUNT(u.id) AS number_of_members
             FROM skills s
             JOIN skill_memberships m ON m.skill_id = s.id
             JOIN users u ON u.id = m.user_id AND u.is_vouched = 1
             GROUP BY s.id, s.name",
        );
        sql.push_str(&order_clause(filter));
        sql.push_str(&format!(" LIMIT {} OFFSET {}", filter.limit, filter.offset));

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut listings = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: String = row
                .try_get("id")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let id = id
                .parse::<SkillId>()
                .map_err(|e| RepositoryError::Query(format!("invalid skill id: {e}")))?;
            listings.push(SkillListing {
                id,
                name: row
                    .try_get("name")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?,
                number_of_members: row
                    .try_get("number_of_members")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?,
            });
        }

        Ok(listings)
    }

    async fn count_nonempty(&self) -> Result<i64, RepositoryError> {
        let row = sqlx::query(
            "SELECT COUNT(DISTINCT m.skill_id) AS total
             FROM skill_memberships m
             JOIN users u ON u.id = m.user_id AND u.is_vouched = 1",
        )
        .fetch_one(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.try_get("total")
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }
}
