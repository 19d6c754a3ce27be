//! User repository trait definition.
//!
//! Accounts are owned by the external identity collaborator; Commons keeps a
//! local record only for vouch/superuser gating and curator references.

use commons_types::error::RepositoryError;
use commons_types::user::{User, UserId};

/// Repository trait for user records.
pub trait UserRepository: Send + Sync {
    /// Create a new user record (provisioning surface). Returns the created user.
    fn create(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    /// Get a user by ID.
    fn get_by_id(
        &self,
        id: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Get a user by username.
    fn get_by_username(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;
}
