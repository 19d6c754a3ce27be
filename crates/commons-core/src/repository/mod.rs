//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (commons-infra) implements. The core crate never depends on any specific
//! storage technology.

pub mod alias;
pub mod group;
pub mod skill;
pub mod user;

/// Sort order for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Asc
    }
}

/// Field the directory listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryOrder {
    Id,
    Name,
    MemberCount,
}

impl Default for DirectoryOrder {
    fn default() -> Self {
        DirectoryOrder::Id
    }
}

impl std::str::FromStr for DirectoryOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" => Ok(DirectoryOrder::Id),
            "name" => Ok(DirectoryOrder::Name),
            "number_of_members" => Ok(DirectoryOrder::MemberCount),
            other => Err(format!("invalid ordering field: '{other}'")),
        }
    }
}

/// Ordering and window applied to a member-count listing query.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryFilter {
    pub order_by: DirectoryOrder,
    pub order: SortOrder,
    pub limit: i64,
    pub offset: i64,
}
