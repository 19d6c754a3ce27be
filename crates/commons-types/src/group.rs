use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::user::UserId;

/// Unique identifier for a group, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub Uuid);

impl GroupId {
    /// Create a new GroupId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a GroupId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GroupId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Whether a group admits new members.
///
/// - Yes: anyone vouched can join directly
/// - No: the group is closed, join attempts are rejected
/// - ByRequest: joining requires approval outside this subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipPolicy {
    Yes,
    No,
    ByRequest,
}

impl fmt::Display for MembershipPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipPolicy::Yes => write!(f, "yes"),
            MembershipPolicy::No => write!(f, "no"),
            MembershipPolicy::ByRequest => write!(f, "by_request"),
        }
    }
}

impl FromStr for MembershipPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yes" => Ok(MembershipPolicy::Yes),
            "no" => Ok(MembershipPolicy::No),
            "by_request" => Ok(MembershipPolicy::ByRequest),
            other => Err(format!("invalid membership policy: '{other}'")),
        }
    }
}

impl Default for MembershipPolicy {
    fn default() -> Self {
        MembershipPolicy::ByRequest
    }
}

/// A community group.
///
/// The `url` slug is assigned once at creation from the name and never
/// changes afterwards; renames are tracked through `GroupAlias` rows instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    /// Stable URL-safe slug, unique across groups.
    pub url: String,
    /// Unique display name.
    pub name: String,
    pub description: String,
    pub irc_channel: String,
    /// Canonical form always carries a trailing slash on a bare origin.
    pub website: String,
    pub wiki: String,
    /// Shown to prospective members of by-request groups.
    pub new_member_criteria: String,
    pub accepting_new_members: MembershipPolicy,
    pub members_can_leave: bool,
    pub visible: bool,
    /// Superuser-only classification with elevated meaning outside this
    /// subsystem.
    pub functional_area: bool,
    /// Designated responsible editor, assignable only by superusers.
    pub curator_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A historical name still resolving to a group's current record.
///
/// Every group's current name is present as one of its own aliases; a rename
/// adds a new row and keeps the old ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupAlias {
    pub group_id: GroupId,
    /// The historical display name.
    pub name: String,
    /// Slug of the historical name, unique across aliases.
    pub url: String,
}

/// Form payload for group create/edit.
///
/// Restricted fields (`members_can_leave`, `visible`, `functional_area`,
/// `accepting_new_members`, `curator_id`) are accepted from anyone but only
/// honored per the field permission policy; disallowed submissions are
/// silently ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupForm {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub irc_channel: Option<String>,
    pub website: Option<String>,
    pub wiki: Option<String>,
    pub new_member_criteria: Option<String>,
    pub members_can_leave: Option<bool>,
    pub visible: Option<bool>,
    pub functional_area: Option<bool>,
    pub accepting_new_members: Option<String>,
    pub curator_id: Option<String>,
}

/// Generate a URL-safe slug from a display name.
///
/// Rules:
/// - Lowercase
/// - Replace non-alphanumeric characters with hyphens
/// - Collapse consecutive hyphens into one
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use commons_types::group::slugify;
///
/// assert_eq!(slugify("Rust Developers"), "rust-developers");
/// assert_eq!(slugify("QA  (Quality  Assurance)"), "qa-quality-assurance");
/// assert_eq!(slugify("---web---dev---"), "web-dev");
/// ```
pub fn slugify(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();

    // Collapse consecutive hyphens and trim edges
    let mut result = String::with_capacity(slug.len());
    let mut prev_was_hyphen = true; // treat start as hyphen to trim leading
    for c in slug.chars() {
        if c == '-' {
            if !prev_was_hyphen {
                result.push('-');
            }
            prev_was_hyphen = true;
        } else {
            result.push(c);
            prev_was_hyphen = false;
        }
    }

    // Trim trailing hyphen
    if result.ends_with('-') {
        result.pop();
    }

    result
}
