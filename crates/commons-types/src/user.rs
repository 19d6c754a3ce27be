use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Unique identifier for a user, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Create a new UserId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a UserId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A community member account.
///
/// Identity and session mechanics live in an external collaborator; Commons
/// only keeps the attributes the membership subsystem gates on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Unique login name, assigned by the identity provider.
    pub username: String,
    /// Community endorsement flag. Unvouched users cannot join groups or
    /// skills and do not count toward skill member totals.
    pub is_vouched: bool,
    /// Grants access to the restricted group fields (functional_area,
    /// curator assignment, membership policy on ordinary groups).
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a plain vouched member account (tests and provisioning).
    pub fn vouched(username: &str) -> Self {
        Self {
            id: UserId::new(),
            username: username.to_string(),
            is_vouched: true,
            is_superuser: false,
            created_at: Utc::now(),
        }
    }
}
