//! Skill repository trait definition.

use commons_types::error::RepositoryError;
use commons_types::skill::{Skill, SkillId};
use commons_types::user::UserId;

use super::DirectoryFilter;

/// One row of the skill directory listing with its live vouched-member count.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillListing {
    pub id: SkillId,
    pub name: String,
    pub number_of_members: i64,
}

/// Repository trait for skill persistence and skill membership edges.
pub trait SkillRepository: Send + Sync {
    /// Create a new skill. Returns the created skill.
    fn create(
        &self,
        skill: &Skill,
    ) -> impl std::future::Future<Output = Result<Skill, RepositoryError>> + Send;

    /// Get a skill by its unique URL slug.
    fn get_by_url(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<Option<Skill>, RepositoryError>> + Send;

    /// Add a membership edge. Returns true if the edge was actually created.
    fn add_member(
        &self,
        skill: &SkillId,
        user: &UserId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Remove a membership edge. Returns true if the edge actually existed.
    fn remove_member(
        &self,
        skill: &SkillId,
        user: &UserId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Whether the user currently holds a membership edge to the skill.
    fn is_member(
        &self,
        skill: &SkillId,
        user: &UserId,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// List skills with a strictly positive vouched member count. Unvouched
    /// membership edges (historical artifacts) never count.
    fn list_with_member_counts(
        &self,
        filter: &DirectoryFilter,
    ) -> impl std::future::Future<Output = Result<Vec<SkillListing>, RepositoryError>> + Send;

    /// Total number of skills with at least one vouched member.
    fn count_nonempty(
        &self,
    ) -> impl std::future::Future<Output = Result<i64, RepositoryError>> + Send;
}
