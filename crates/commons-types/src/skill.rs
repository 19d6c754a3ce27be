use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::group::slugify;

/// Unique identifier for a skill, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillId(pub Uuid);

impl SkillId {
    /// Create a new SkillId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a SkillId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for SkillId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SkillId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A skill members can tag themselves with.
///
/// Much simpler than a group: no curator, no membership policy, no visibility
/// flags. Skills are provisioned externally (CLI), never through the web
/// layer, and joining is unconditional beyond vouched status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    /// URL-safe unique slug derived from the name.
    pub url: String,
    /// Unique display name.
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Skill {
    /// Build a new skill with a slug derived from the name.
    pub fn new(name: &str) -> Self {
        Self {
            id: SkillId::new(),
            url: slugify(name),
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_new_derives_slug() {
        let skill = Skill::new("Embedded Systems");
        assert_eq!(skill.url, "embedded-systems");
        assert_eq!(skill.name, "Embedded Systems");
    }

    #[test]
    fn test_skill_id_display_roundtrip() {
        let id = SkillId::new();
        let parsed: SkillId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
