//! Group alias lookup trait definition.
//!
//! Aliases live in their own table keyed by historical name/slug so their
//! lifecycle stays independent of group attribute edits. Writes happen inside
//! `GroupRepository` transactions (create/rename); this trait is the
//! resolution side.

use commons_types::error::RepositoryError;
use commons_types::group::GroupId;

/// Read-side lookup over the alias table.
pub trait GroupAliasRepository: Send + Sync {
    /// Resolve a (possibly historical) URL slug to the canonical group ID.
    fn resolve_url(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<Option<GroupId>, RepositoryError>> + Send;
}
