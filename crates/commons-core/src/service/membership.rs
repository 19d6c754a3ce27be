//! Membership toggle service.
//!
//! One entry point per target kind: a vouched member either joins or leaves
//! depending on their current membership edge. Every successful edge change
//! dispatches exactly one notification after the row is committed; rejected
//! and no-op paths never notify.

use commons_types::error::{MembershipError, RepositoryError};
use commons_types::group::{GroupId, MembershipPolicy};
use commons_types::user::User;

use crate::notify::MembershipNotifier;
use crate::repository::group::GroupRepository;
use crate::repository::skill::SkillRepository;

/// What a successful toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Joined,
    Left,
}

/// Service owning the join/leave business rules for groups and skills.
pub struct MembershipService<G: GroupRepository, S: SkillRepository, N: MembershipNotifier> {
    groups: G,
    skills: S,
    notifier: N,
}

impl<G: GroupRepository, S: SkillRepository, N: MembershipNotifier> MembershipService<G, S, N> {
    pub fn new(groups: G, skills: S, notifier: N) -> Self {
        Self {
            groups,
            skills,
            notifier,
        }
    }

    /// Toggle the actor's membership in a group.
    ///
    /// Joining is gated on the group's membership policy (`no` rejects with
    /// no mutation); leaving is never gated here. Unvouched actors are
    /// rejected before any read-modify-write.
    pub async fn toggle_group(
        &self,
        actor: &User,
        group_id: &GroupId,
    ) -> Result<ToggleOutcome, MembershipError> {
        let group = self
            .groups
            .get_by_id(group_id)
            .await
            .map_err(storage)?
            .ok_or(MembershipError::NotFound)?;

        if !actor.is_vouched {
            return Err(MembershipError::NotVouched);
        }

        if self
            .groups
            .is_member(&group.id, &actor.id)
            .await
            .map_err(storage)?
        {
            let removed = self
                .groups
                .remove_member(&group.id, &actor.id)
                .await
                .map_err(storage)?;
            if removed {
                tracing::debug!(group = %group.url, user = %actor.id, "member left group");
                self.notifier.membership_changed(&actor.id);
            }
            Ok(ToggleOutcome::Left)
        } else {
            if group.accepting_new_members == MembershipPolicy::No {
                return Err(MembershipError::NotAccepting);
            }
            let added = self
                .groups
                .add_member(&group.id, &actor.id)
                .await
                .map_err(storage)?;
            if added {
                tracing::debug!(group = %group.url, user = %actor.id, "member joined group");
                self.notifier.membership_changed(&actor.id);
            }
            Ok(ToggleOutcome::Joined)
        }
    }

    /// Toggle the actor's membership in a skill, addressed by slug.
    ///
    /// Skills have no membership policy; vouched status is the only gate.
    pub async fn toggle_skill(
        &self,
        actor: &User,
        skill_url: &str,
    ) -> Result<ToggleOutcome, MembershipError> {
        let skill = self
            .skills
            .get_by_url(skill_url)
            .await
            .map_err(storage)?
            .ok_or(MembershipError::NotFound)?;

        if !actor.is_vouched {
            return Err(MembershipError::NotVouched);
        }

        if self
            .skills
            .is_member(&skill.id, &actor.id)
            .await
            .map_err(storage)?
        {
            let removed = self
                .skills
                .remove_member(&skill.id, &actor.id)
                .await
                .map_err(storage)?;
            if removed {
                tracing::debug!(skill = %skill.url, user = %actor.id, "member dropped skill");
                self.notifier.membership_changed(&actor.id);
            }
            Ok(ToggleOutcome::Left)
        } else {
            let added = self
                .skills
                .add_member(&skill.id, &actor.id)
                .await
                .map_err(storage)?;
            if added {
                tracing::debug!(skill = %skill.url, user = %actor.id, "member picked up skill");
                self.notifier.membership_changed(&actor.id);
            }
            Ok(ToggleOutcome::Joined)
        }
    }
}

fn storage(e: RepositoryError) -> MembershipError {
    MembershipError::Storage(e.to_string())
}
