//! Directory query service.
//!
//! Read-only listings of groups and skills annotated with live member
//! counts. Counts are computed at query time over the membership relation --
//! never cached -- so the listing reflects concurrent toggles at read time.

use commons_types::directory::{DirectoryEntry, DirectoryPage};
use commons_types::error::DirectoryError;

use crate::repository::group::GroupRepository;
use crate::repository::skill::SkillRepository;
use crate::repository::{DirectoryFilter, DirectoryOrder, SortOrder};

/// Upper bound on the requested page size.
const MAX_PAGE_SIZE: u32 = 500;

/// Ordering and page selection for a directory request.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryQuery {
    pub order_by: DirectoryOrder,
    pub order: SortOrder,
    /// 1-based page number; zero is treated as the first page.
    pub page: u32,
    pub page_size: Option<u32>,
}

/// Service owning the read-only directory listings.
pub struct DirectoryService<G: GroupRepository, S: SkillRepository> {
    groups: G,
    skills: S,
    site_url: String,
    default_page_size: u32,
}

impl<G: GroupRepository, S: SkillRepository> DirectoryService<G, S> {
    pub fn new(groups: G, skills: S, site_url: &str, default_page_size: u32) -> Self {
        Self {
            groups,
            skills,
            site_url: site_url.trim_end_matches('/').to_string(),
            default_page_size,
        }
    }

    /// List groups with at least one member. Entries carry the absolute
    /// canonical group URL.
    pub async fn list_groups(
        &self,
        query: DirectoryQuery,
    ) -> Result<DirectoryPage, DirectoryError> {
        let (page, page_size, filter) = self.window(query);

        let listings = self
            .groups
            .list_with_member_counts(&filter)
            .await
            .map_err(|e| DirectoryError::Storage(e.to_string()))?;
        let total_count = self
            .groups
            .count_nonempty()
            .await
            .map_err(|e| DirectoryError::Storage(e.to_string()))?;

        let entries = listings
            .into_iter()
            .map(|l| DirectoryEntry {
                id: l.id.to_string(),
                name: l.name,
                number_of_members: l.number_of_members,
                url: Some(format!("{}/groups/{}/", self.site_url, l.url)),
            })
            .collect();

        Ok(DirectoryPage {
            entries,
            total_count,
            page,
            page_size,
        })
    }

    /// List skills with at least one vouched member. No URL field.
    pub async fn list_skills(
        &self,
        query: DirectoryQuery,
    ) -> Result<DirectoryPage, DirectoryError> {
        let (page, page_size, filter) = self.window(query);

        let listings = self
            .skills
            .list_with_member_counts(&filter)
            .await
            .map_err(|e| DirectoryError::Storage(e.to_string()))?;
        let total_count = self
            .skills
            .count_nonempty()
            .await
            .map_err(|e| DirectoryError::Storage(e.to_string()))?;

        let entries = listings
            .into_iter()
            .map(|l| DirectoryEntry {
                id: l.id.to_string(),
                name: l.name,
                number_of_members: l.number_of_members,
                url: None,
            })
            .collect();

        Ok(DirectoryPage {
            entries,
            total_count,
            page,
            page_size,
        })
    }

    fn window(&self, query: DirectoryQuery) -> (u32, u32, DirectoryFilter) {
        let page_size = query
            .page_size
            .unwrap_or(self.default_page_size)
            .clamp(1, MAX_PAGE_SIZE);
        let page = query.page.max(1);
        let filter = DirectoryFilter {
            order_by: query.order_by,
            order: query.order,
            limit: page_size as i64,
            offset: (page as i64 - 1) * page_size as i64,
        };
        (page, page_size, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::{InMemoryStore, make_group, make_skill};
    use commons_types::group::MembershipPolicy;
    use commons_types::user::User;

    fn seeded_store() -> InMemoryStore {
        let store = InMemoryStore::default();
        let alice = User::vouched("alice");
        let bob = User::vouched("bob");
        let mut carol = User::vouched("carol");
        carol.is_vouched = false;
        store.insert_user(alice.clone());
        store.insert_user(bob.clone());
        store.insert_user(carol.clone());

        let busy = make_group("Busy Group", MembershipPolicy::Yes);
        let quiet = make_group("Quiet Group", MembershipPolicy::Yes);
        let empty = make_group("Empty Group", MembershipPolicy::Yes);
        store.insert_group(busy.clone());
        store.insert_group(quiet.clone());
        store.insert_group(empty.clone());
        store.add_group_member(&busy.id, &alice.id);
        store.add_group_member(&busy.id, &bob.id);
        store.add_group_member(&quiet.id, &alice.id);

        let rust = make_skill("Rust");
        let ghost = make_skill("Ghost Skill");
        store.insert_skill(rust.clone());
        store.insert_skill(ghost.clone());
        store.add_skill_member(&rust.id, &alice.id);
        // Unvouched membership edge: a historical artifact that must not count.
        store.add_skill_member(&ghost.id, &carol.id);

        store
    }

    fn service(store: &InMemoryStore) -> DirectoryService<InMemoryStore, InMemoryStore> {
        DirectoryService::new(store.clone(), store.clone(), "https://people.example.org/", 20)
    }

    #[tokio::test]
    async fn groups_listing_excludes_empty_groups() {
        let store = seeded_store();
        let svc = service(&store);

        let page = svc.list_groups(DirectoryQuery::default()).await.unwrap();
        assert_eq!(page.total_count, 2);
        let names: Vec<&str> = page.entries.iter().map(|e| e.name.as_str()).collect();
        assert!(names.contains(&"Busy Group"));
        assert!(names.contains(&"Quiet Group"));
        assert!(!names.contains(&"Empty Group"));
    }

    #[tokio::test]
    async fn group_entries_carry_absolute_urls() {
        let store = seeded_store();
        let svc = service(&store);

        let page = svc.list_groups(DirectoryQuery::default()).await.unwrap();
        let busy = page.entries.iter().find(|e| e.name == "Busy Group").unwrap();
        assert_eq!(
            busy.url.as_deref(),
            Some("https://people.example.org/groups/busy-group/")
        );
        assert_eq!(busy.number_of_members, 2);
    }

    #[tokio::test]
    async fn skills_count_only_vouched_members() {
        let store = seeded_store();
        let svc = service(&store);

        let page = svc.list_skills(DirectoryQuery::default()).await.unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.entries.len(), 1);
        assert_eq!(page.entries[0].name, "Rust");
        assert_eq!(page.entries[0].number_of_members, 1);
        assert!(page.entries[0].url.is_none());
    }

    #[tokio::test]
    async fn ordering_by_member_count_desc() {
        let store = seeded_store();
        let svc = service(&store);

        let page = svc
            .list_groups(DirectoryQuery {
                order_by: DirectoryOrder::MemberCount,
                order: SortOrder::Desc,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.entries[0].name, "Busy Group");
        assert_eq!(page.entries[1].name, "Quiet Group");
    }

    #[tokio::test]
    async fn pagination_windows_results() {
        let store = seeded_store();
        let svc = service(&store);

        let page = svc
            .list_groups(DirectoryQuery {
                order_by: DirectoryOrder::Name,
                page: 2,
                page_size: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.entries.len(), 1);
        assert_eq!(page.entries[0].name, "Quiet Group");
        assert_eq!(page.total_count, 2);
        assert_eq!(page.total_pages(), 2);
    }

    #[tokio::test]
    async fn listing_reflects_departures_immediately() {
        let store = seeded_store();
        let svc = service(&store);

        let before = svc.list_groups(DirectoryQuery::default()).await.unwrap();
        assert_eq!(before.total_count, 2);

        // The last member of the quiet group leaves.
        let quiet = store.get_group_by_name("Quiet Group").unwrap();
        let alice = crate::repository::user::UserRepository::get_by_username(&store, "alice")
            .await
            .unwrap()
            .unwrap();
        crate::repository::group::GroupRepository::remove_member(&store, &quiet.id, &alice.id)
            .await
            .unwrap();

        let page = svc.list_groups(DirectoryQuery::default()).await.unwrap();
        assert_eq!(page.total_count, 1);
        let names: Vec<&str> = page.entries.iter().map(|e| e.name.as_str()).collect();
        assert!(!names.contains(&"Quiet Group"));
    }
}
