//! SQLite group repository implementation.
//!
//! Implements `GroupRepository` from `commons-core` using sqlx with split
//! read/write pools. Creation and rename both touch the alias table inside
//! the same transaction as the group row, so a group and its name history
//! never diverge.

use commons_core::repository::group::{GroupListing, GroupRepository};
use commons_core::repository::{DirectoryFilter, DirectoryOrder, SortOrder};
use commons_types::error::RepositoryError;
use commons_types::group::{Group, GroupAlias, GroupId, MembershipPolicy};
use commons_types::user::UserId;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `GroupRepository`.
pub struct SqliteGroupRepository {
    pool: DatabasePool,
}

impl SqliteGroupRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Group.
struct GroupRow {
    id: String,
    url: String,
    name: String,
    description: String,
    irc_channel: String,
    website: String,
    wiki: String,
    new_member_criteria: String,
    accepting_new_members: String,
    members_can_leave: bool,
    visible: bool,
    functional_area: bool,
    curator_id: Option<String>,
    created_at: String,
    updated_at: String,
}

impl GroupRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            url: row.try_get("url")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            irc_channel: row.try_get("irc_channel")?,
            website: row.try_get("website")?,
            wiki: row.try_get("wiki")?,
            new_member_criteria: row.try_get("new_member_criteria")?,
            accepting_new_members: row.try_get("accepting_new_members")?,
            members_can_leave: row.try_get("members_can_leave")?,
            visible: row.try_get("visible")?,
            functional_area: row.try_get("functional_area")?,
            curator_id: row.try_get("curator_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_group(self) -> Result<Group, RepositoryError> {
        let id = self
            .id
            .parse::<GroupId>()
            .map_err(|e| RepositoryError::Query(format!("invalid group id: {e}")))?;

        let accepting_new_members: MembershipPolicy = self
            .accepting_new_members
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        let curator_id = self
            .curator_id
            .as_deref()
            .map(|s| {
                s.parse::<UserId>()
                    .map_err(|e| RepositoryError::Query(format!("invalid curator id: {e}")))
            })
            .transpose()?;

        let created_at = parse_datetime(&self.created_at)?;
        let updated_at = parse_datetime(&self.updated_at)?;

        Ok(Group {
            id,
            url: self.url,
            name: self.name,
            description: self.description,
            irc_channel: self.irc_channel,
            website: self.website,
            wiki: self.wiki,
            new_member_criteria: self.new_member_criteria,
            accepting_new_members,
            members_can_leave: self.members_can_leave,
            visible: self.visible,
            functional_area: self.functional_area,
            curator_id,
            created_at,
            updated_at,
        })
    }
}

fn order_clause(filter: &DirectoryFilter) -> String {
    let field = match filter.order_by {
        DirectoryOrder::Id => "g.id",
        DirectoryOrder::Name => "g.name",
        DirectoryOrder::MemberCount => "number_of_members",
    };
    let direction = match filter.order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    format!(" ORDER BY {field} {direction}")
}

impl GroupRepository for SqliteGroupRepository {
    async fn create(&self, group: &Group) -> Result<Group, RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO groups (id, url, name, description, irc_channel, website, wiki, new_member_criteria, accepting_new_members, members_can_leave, visible, functional_area, curator_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(group.id.to_string())
        .bind(&group.url)
        .bind(&group.name)
        .bind(&group.description)
        .bind(&group.irc_channel)
        .bind(&group.website)
        .bind(&group.wiki)
        .bind(&group.new_member_criteria)
        .bind(group.accepting_new_members.to_string())
        .bind(group.members_can_leave)
        .bind(group.visible)
        .bind(group.functional_area)
        .bind(group.curator_id.as_ref().map(|id| id.to_string()))
        .bind(format_datetime(&group.created_at))
        .bind(format_datetime(&group.updated_at))
        .execute(&mut *tx)
        .await;

        if let Err(e) = result {
            return match e {
                sqlx::Error::Database(db_err) if db_err.message().contains("UNIQUE") => Err(
                    RepositoryError::Conflict(format!("name '{}' already exists", group.name)),
                ),
                e => Err(RepositoryError::Query(e.to_string())),
            };
        }

        // The initial name is also the group's first alias.
        let alias_result = sqlx::query(
            "INSERT INTO group_aliases (group_id, name, url) VALUES (?, ?, ?)",
        )
        .bind(group.id.to_string())
        .bind(&group.name)
        .bind(&group.url)
        .execute(&mut *tx)
        .await;

        if let Err(e) = alias_result {
            return match e {
                sqlx::Error::Database(db_err) if db_err.message().contains("UNIQUE") => Err(
                    RepositoryError::Conflict(format!("name '{}' already exists", group.name)),
                ),
                e => Err(RepositoryError::Query(e.to_string())),
            };
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(group.clone())
    }

    async fn get_by_id(&self, id: &GroupId) -> Result<Option<Group>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM groups WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let group_row =
                    GroupRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(group_row.into_group()?))
            }
            None => Ok(None),
        }
    }

    async fn get_by_url(&self, url: &str) -> Result<Option<Group>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM groups WHERE url = ?")
            .bind(url)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let group_row =
                    GroupRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(group_row.into_group()?))
            }
            None => Ok(None),
        }
    }

    async fn update(
        &self,
        group: &Group,
        new_alias: Option<&GroupAlias>,
    ) -> Result<Group, RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE groups SET name = ?, description = ?, irc_channel = ?, website = ?, wiki = ?, new_member_criteria = ?, accepting_new_members = ?, members_can_leave = ?, visible = ?, functional_area = ?, curator_id = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&group.name)
        .bind(&group.description)
        .bind(&group.irc_channel)
        .bind(&group.website)
        .bind(&group.wiki)
        .bind(&group.new_member_criteria)
        .bind(group.accepting_new_members.to_string())
        .bind(group.members_can_leave)
        .bind(group.visible)
        .bind(group.functional_area)
        .bind(group.curator_id.as_ref().map(|id| id.to_string()))
        .bind(format_datetime(&group.updated_at))
        .bind(group.id.to_string())
        .execute(&mut *tx)
        .await;

        match result {
            Ok(r) if r.rows_affected() == 0 => return Err(RepositoryError::NotFound),
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                return Err(RepositoryError::Conflict(format!(
                    "name '{}' already exists",
                    group.name
                )));
            }
            Err(e) => return Err(RepositoryError::Query(e.to_string())),
        }

        if let Some(alias) = new_alias {
            let alias_result = sqlx::query(
                "INSERT INTO group_aliases (group_id, name, url) VALUES (?, ?, ?)",
            )
            .bind(alias.group_id.to_string())
            .bind(&alias.name)
            .bind(&alias.url)
            .execute(&mut *tx)
            .await;

            if let Err(e) = alias_result {
                return match e {
                    sqlx::Error::Database(db_err) if db_err.message().contains("UNIQUE") => {
                        Err(RepositoryError::Conflict(format!(
                            "name '{}' already exists",
                            alias.name
                        )))
                    }
                    e => Err(RepositoryError::Query(e.to_string())),
                };
            }
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(group.clone())
    }

    async fn add_member(&self, group: &GroupId, user: &UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO group_memberships (group_id, user_id) VALUES (?, ?)",
        )
        .bind(group.to_string())
        .bind(user.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_member(&self, group: &GroupId, user: &UserId) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("DELETE FROM group_memberships WHERE group_id = ? AND user_id = ?")
                .bind(group.to_string())
                .bind(user.to_string())
                .execute(&self.pool.writer)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_member(&self, group: &GroupId, user: &UserId) -> Result<bool, RepositoryError> {
        let row =
            sqlx::query("SELECT 1 FROM group_memberships WHERE group_id = ? AND user_id = ?")
                .bind(group.to_string())
                .bind(user.to_string())
                .fetch_optional(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(row.is_some())
    }

    async fn list_with_member_counts(
        &self,
        filter: &DirectoryFilter,
    ) -> Result<Vec<GroupListing>, RepositoryError> {
        // The count is a query-time aggregate over the edge table; nothing is
        // ever denormalized, so departures show up immediately.
        let mut sql = String::from(
            "SELECT g.id, g.name, g.url, COUNT(m.user_id) AS number_of_members
             FROM groups g
             JOIN group_memberships m ON m.group_id = g.id
             GROUP BY g.id, g.name, g.url",
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
                .parse::<GroupId>()
                .map_err(|e| RepositoryError::Query(format!("invalid group id: {e}")))?;
            listings.push(GroupListing {
                id,
                name: row
                    .try_get("name")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?,
                url: row
                    .try_get("url")
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
            "SELECT COUNT(DISTINCT group_id) AS total FROM group_memberships",
        )
        .fetch_one(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.try_get("total")
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }
}
