//! In-memory trait implementations backing the service unit tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use commons_types::error::RepositoryError;
use commons_types::group::{Group, GroupAlias, GroupId, MembershipPolicy, slugify};
use commons_types::skill::{Skill, SkillId};
use commons_types::user::{User, UserId};

use crate::notify::MembershipNotifier;
use crate::repository::alias::GroupAliasRepository;
use crate::repository::group::{GroupListing, GroupRepository};
use crate::repository::skill::{SkillListing, SkillRepository};
use crate::repository::user::UserRepository;
use crate::repository::{DirectoryFilter, DirectoryOrder, SortOrder};

#[derive(Default)]
struct Inner {
    groups: Vec<Group>,
    skills: Vec<Skill>,
    users: Vec<User>,
    group_members: HashSet<(GroupId, UserId)>,
    skill_members: HashSet<(SkillId, UserId)>,
    aliases: Vec<GroupAlias>,
}

/// One shared store implementing every repository trait.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryStore {
    pub fn insert_group(&self, group: Group) {
        let mut inner = self.inner.lock().unwrap();
        inner.aliases.push(GroupAlias {
            group_id: group.id.clone(),
            name: group.name.clone(),
            url: group.url.clone(),
        });
        inner.groups.push(group);
    }

    pub fn insert_skill(&self, skill: Skill) {
        self.inner.lock().unwrap().skills.push(skill);
    }

    pub fn insert_user(&self, user: User) {
        self.inner.lock().unwrap().users.push(user);
    }

    pub fn add_group_member(&self, group: &GroupId, user: &UserId) {
        self.inner
            .lock()
            .unwrap()
            .group_members
            .insert((group.clone(), user.clone()));
    }

    pub fn add_skill_member(&self, skill: &SkillId, user: &UserId) {
        self.inner
            .lock()
            .unwrap()
            .skill_members
            .insert((skill.clone(), user.clone()));
    }

    pub fn group_has_member(&self, group: &GroupId, user: &UserId) -> bool {
        self.inner
            .lock()
            .unwrap()
            .group_members
            .contains(&(group.clone(), user.clone()))
    }

    pub fn skill_has_member(&self, skill: &SkillId, user: &UserId) -> bool {
        self.inner
            .lock()
            .unwrap()
            .skill_members
            .contains(&(skill.clone(), user.clone()))
    }

    pub fn get_group_by_name(&self, name: &str) -> Option<Group> {
        self.inner
            .lock()
            .unwrap()
            .groups
            .iter()
            .find(|g| g.name == name)
            .cloned()
    }

    pub fn aliases_for(&self, group: &GroupId) -> Vec<GroupAlias> {
        self.inner
            .lock()
            .unwrap()
            .aliases
            .iter()
            .filter(|a| &a.group_id == group)
            .cloned()
            .collect()
    }
}

/// Build a test group with the given membership policy.
pub fn make_group(name: &str, policy: MembershipPolicy) -> Group {
    let now = Utc::now();
    Group {
        id: GroupId::new(),
        url: slugify(name),
        name: name.to_string(),
        description: String::new(),
        irc_channel: String::new(),
        website: String::new(),
        wiki: String::new(),
        new_member_criteria: String::new(),
        accepting_new_members: policy,
        members_can_leave: true,
        visible: true,
        functional_area: false,
        curator_id: None,
        created_at: now,
        updated_at: now,
    }
}

/// Build a test skill.
pub fn make_skill(name: &str) -> Skill {
    Skill::new(name)
}

/// Notifier that records every dispatched user ID.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    calls: Arc<Mutex<Vec<UserId>>>,
}

impl RecordingNotifier {
    pub fn calls(&self) -> Vec<UserId> {
        self.calls.lock().unwrap().clone()
    }
}

impl MembershipNotifier for RecordingNotifier {
    fn membership_changed(&self, user: &UserId) {
        self.calls.lock().unwrap().push(user.clone());
    }
}

fn window<T>(mut items: Vec<T>, filter: &DirectoryFilter) -> Vec<T> {
    let offset = filter.offset.max(0) as usize;
    let limit = filter.limit.max(0) as usize;
    if offset >= items.len() {
        return Vec::new();
    }
    let mut items = items.split_off(offset);
    items.truncate(limit);
    items
}

impl GroupRepository for InMemoryStore {
    async fn create(&self, group: &Group) -> Result<Group, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        let name_taken = inner.groups.iter().any(|g| g.name == group.name)
            || inner.aliases.iter().any(|a| a.name == group.name);
        let url_taken = inner.groups.iter().any(|g| g.url == group.url)
            || inner.aliases.iter().any(|a| a.url == group.url);
        if name_taken || url_taken {
            return Err(RepositoryError::Conflict(format!(
                "name '{}' already exists",
                group.name
            )));
        }
        inner.aliases.push(GroupAlias {
            group_id: group.id.clone(),
            name: group.name.clone(),
            url: group.url.clone(),
        });
        inner.groups.push(group.clone());
        Ok(group.clone())
    }

    async fn get_by_id(&self, id: &GroupId) -> Result<Option<Group>, RepositoryError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .groups
            .iter()
            .find(|g| &g.id == id)
            .cloned())
    }

    async fn get_by_url(&self, url: &str) -> Result<Option<Group>, RepositoryError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .groups
            .iter()
            .find(|g| g.url == url)
            .cloned())
    }

    async fn update(
        &self,
        group: &Group,
        new_alias: Option<&GroupAlias>,
    ) -> Result<Group, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(alias) = new_alias {
            let taken = inner
                .aliases
                .iter()
                .any(|a| (a.name == alias.name || a.url == alias.url) && a.group_id != alias.group_id);
            if taken {
                return Err(RepositoryError::Conflict(format!(
                    "name '{}' already exists",
                    alias.name
                )));
            }
        }
        let Some(existing) = inner.groups.iter_mut().find(|g| g.id == group.id) else {
            return Err(RepositoryError::NotFound);
        };
        *existing = group.clone();
        if let Some(alias) = new_alias {
            inner.aliases.push(alias.clone());
        }
        Ok(group.clone())
    }

    async fn add_member(&self, group: &GroupId, user: &UserId) -> Result<bool, RepositoryError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .group_members
            .insert((group.clone(), user.clone())))
    }

    async fn remove_member(&self, group: &GroupId, user: &UserId) -> Result<bool, RepositoryError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .group_members
            .remove(&(group.clone(), user.clone())))
    }

    async fn is_member(&self, group: &GroupId, user: &UserId) -> Result<bool, RepositoryError> {
        Ok(self.group_has_member(group, user))
    }

    async fn list_with_member_counts(
        &self,
        filter: &DirectoryFilter,
    ) -> Result<Vec<GroupListing>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        let mut listings: Vec<GroupListing> = inner
            .groups
            .iter()
            .map(|g| GroupListing {
                id: g.id.clone(),
                name: g.name.clone(),
                url: g.url.clone(),
                number_of_members: inner
                    .group_members
                    .iter()
                    .filter(|(gid, _)| gid == &g.id)
                    .count() as i64,
            })
            .filter(|l| l.number_of_members > 0)
            .collect();
        sort_listings(&mut listings, filter, |l| {
            (l.id.to_string(), l.name.clone(), l.number_of_members)
        });
        Ok(window(listings, filter))
    }

    async fn count_nonempty(&self) -> Result<i64, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .groups
            .iter()
            .filter(|g| inner.group_members.iter().any(|(gid, _)| gid == &g.id))
            .count() as i64)
    }
}

fn sort_listings<T, K: FnMut(&T) -> (String, String, i64)>(
    listings: &mut [T],
    filter: &DirectoryFilter,
    mut key: K,
) {
    listings.sort_by(|a, b| {
        let (a_id, a_name, a_count) = key(a);
        let (b_id, b_name, b_count) = key(b);
        let ordering = match filter.order_by {
            DirectoryOrder::Id => a_id.cmp(&b_id),
            DirectoryOrder::Name => a_name.cmp(&b_name),
            DirectoryOrder::MemberCount => a_count.cmp(&b_count).then(a_id.cmp(&b_id)),
        };
        match filter.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

impl SkillRepository for InMemoryStore {
    async fn create(&self, skill: &Skill) -> Result<Skill, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .skills
            .iter()
            .any(|s| s.name == skill.name || s.url == skill.url)
        {
            return Err(RepositoryError::Conflict(format!(
                "name '{}' already exists",
                skill.name
            )));
        }
        inner.skills.push(skill.clone());
        Ok(skill.clone())
    }

    async fn get_by_url(&self, url: &str) -> Result<Option<Skill>, RepositoryError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .skills
            .iter()
            .find(|s| s.url == url)
            .cloned())
    }

    async fn add_member(&self, skill: &SkillId, user: &UserId) -> Result<bool, RepositoryError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .skill_members
            .insert((skill.clone(), user.clone())))
    }

    async fn remove_member(&self, skill: &SkillId, user: &UserId) -> Result<bool, RepositoryError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .skill_members
            .remove(&(skill.clone(), user.clone())))
    }

    async fn is_member(&self, skill: &SkillId, user: &UserId) -> Result<bool, RepositoryError> {
        Ok(self.skill_has_member(skill, user))
    }

    async fn list_with_member_counts(
        &self,
        filter: &DirectoryFilter,
    ) -> Result<Vec<SkillListing>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        let vouched: HashSet<&UserId> = inner
            .users
            .iter()
            .filter(|u| u.is_vouched)
            .map(|u| &u.id)
            .collect();
        let mut listings: Vec<SkillListing> = inner
            .skills
            .iter()
            .map(|s| SkillListing {
                id: s.id.clone(),
                name: s.name.clone(),
                number_of_members: inner
                    .skill_members
                    .iter()
                    .filter(|(sid, uid)| sid == &s.id && vouched.contains(uid))
                    .count() as i64,
            })
            .filter(|l| l.number_of_members > 0)
            .collect();
        sort_listings(&mut listings, filter, |l| {
            (l.id.to_string(), l.name.clone(), l.number_of_members)
        });
        Ok(window(listings, filter))
    }

    async fn count_nonempty(&self) -> Result<i64, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        let vouched: HashSet<&UserId> = inner
            .users
            .iter()
            .filter(|u| u.is_vouched)
            .map(|u| &u.id)
            .collect();
        Ok(inner
            .skills
            .iter()
            .filter(|s| {
                inner
                    .skill_members
                    .iter()
                    .any(|(sid, uid)| sid == &s.id && vouched.contains(uid))
            })
            .count() as i64)
    }
}

impl UserRepository for InMemoryStore {
    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.users.iter().any(|u| u.username == user.username) {
            return Err(RepositoryError::Conflict(format!(
                "username '{}' already exists",
                user.username
            )));
        }
        inner.users.push(user.clone());
        Ok(user.clone())
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| &u.id == id)
            .cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}

impl GroupAliasRepository for InMemoryStore {
    async fn resolve_url(&self, url: &str) -> Result<Option<GroupId>, RepositoryError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .aliases
            .iter()
            .find(|a| a.url == url)
            .map(|a| a.group_id.clone()))
    }
}
