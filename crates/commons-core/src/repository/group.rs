//! Group repository trait definition.

use commons_types::error::RepositoryError;
use commons_types::group::{Group, GroupAlias, GroupId};
use commons_types::user::UserId;

use super::DirectoryFilter;

/// One row of the group directory listing with its live member count.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupListing {
    pub id: GroupId,
    pub name: String,
    /// Relative slug; the directory service absolutifies it.
    pub url: String,
    pub number_of_members: i64,
}

/// Repository trait for group persistence and group membership edges.
///
/// Implementations live in commons-infra (e.g., SqliteGroupRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait GroupRepository: Send + Sync {
    /// Create a new group and its initial name alias in one transaction.
    /// Returns the created group.
    fn create(
        &self,
        group: &Group,
    ) -> impl std::future::Future<Output = Result<Group, RepositoryError>> + Send;

    /// Get a group by its unique ID.
    fn get_by_id(
        &self,
        id: &GroupId,
    ) -> impl std::future::Future<Output = Result<Option<Group>, RepositoryError>> + Send;

    /// Get a group by its unique URL slug.
    fn get_by_url(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<Option<Group>, RepositoryError>> + Send;

    /// Update an existing group; when the update is a rename, the new name
    /// alias is recorded in the same transaction. Returns the updated group.
    fn update(
        &self,
        group: &Group,
        new_alias: Option<&GroupAlias>,
    ) -> impl std::future::Future<Output = Result<Group, RepositoryError>> + Send;

    /// Add a membership edge. Returns true if the edge was actually created,
    /// false if the user was already a member.
    fn add_member(
        &self,
        group: &GroupId,
        user: &UserId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Remove a membership edge. Returns true if the edge actually existed.
    fn remove_member(
        &self,
        group: &GroupId,
        user: &UserId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Whether the user currently holds a membership edge to the group.
    fn is_member(
        &self,
        group: &GroupId,
        user: &UserId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// List groups with a strictly positive live member count, ordered and
    /// windowed per the filter. The count is a query-time aggregate, never a
    /// stored counter.
    fn list_with_member_counts(
        &self,
        filter: &DirectoryFilter,
    ) -> impl std::future::Future<Output = Result<Vec<GroupListing>, RepositoryError>> + Send;

    /// Total number of groups with at least one member.
    fn count_nonempty(
        &self,
    ) -> impl std::future::Future<Output = Result<i64, RepositoryError>> + Send;
}
