//! Group mutation service.
//!
//! Create/edit of groups with the role-gated field policy. The whole
//! mutation is validated up front and written as a single repository call,
//! so a failing field never leaves a half-updated record.

use chrono::Utc;
use commons_types::error::{FieldError, GroupError, RepositoryError};
use commons_types::group::{Group, GroupAlias, GroupForm, GroupId, slugify};
use commons_types::user::{User, UserId};

use crate::repository::alias::GroupAliasRepository;
use crate::repository::group::GroupRepository;
use crate::repository::user::UserRepository;
use crate::service::policy::{self, EditorRole, RestrictedValues};
use crate::service::validate::{ValidatedForm, validate_form};

/// Service owning group create/edit business rules.
pub struct GroupService<G: GroupRepository, A: GroupAliasRepository, U: UserRepository> {
    groups: G,
    aliases: A,
    users: U,
}

impl<G: GroupRepository, A: GroupAliasRepository, U: UserRepository> GroupService<G, A, U> {
    pub fn new(groups: G, aliases: A, users: U) -> Self {
        Self {
            groups,
            aliases,
            users,
        }
    }

    /// Create a group. Any vouched user may create; restricted fields are
    /// resolved against the forced creation defaults per the actor's role.
    pub async fn create_group(&self, actor: &User, form: GroupForm) -> Result<Group, GroupError> {
        if !actor.is_vouched {
            return Err(GroupError::Forbidden(
                "only vouched users can create groups".to_string(),
            ));
        }

        let role = EditorRole::for_actor(actor, None);
        let validated = validate_form(&form).map_err(GroupError::Validation)?;
        let restricted = policy::resolve(
            role,
            &validated.restricted,
            &RestrictedValues::creation_defaults(),
        );
        self.check_curator(&restricted.curator_id).await?;

        let now = Utc::now();
        let group = Group {
            id: GroupId::new(),
            url: slugify(&validated.name),
            name: validated.name.clone(),
            description: validated.description.clone().unwrap_or_default(),
            irc_channel: validated.irc_channel.clone().unwrap_or_default(),
            website: validated.website.clone().unwrap_or_default(),
            wiki: validated.wiki.clone().unwrap_or_default(),
            new_member_criteria: validated.new_member_criteria.clone().unwrap_or_default(),
            accepting_new_members: restricted.accepting_new_members,
            members_can_leave: restricted.members_can_leave,
            visible: restricted.visible,
            functional_area: restricted.functional_area,
            curator_id: restricted.curator_id,
            created_at: now,
            updated_at: now,
        };

        let created = self.groups.create(&group).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => GroupError::NameConflict(group.name.clone()),
            other => GroupError::Storage(other.to_string()),
        })?;

        tracing::info!(group = %created.url, by = %actor.username, "group created");
        Ok(created)
    }

    /// Edit a group addressed by URL slug (historical slugs resolve through
    /// the alias table). Only the group's curator or a superuser may edit.
    pub async fn edit_group(
        &self,
        actor: &User,
        url: &str,
        form: GroupForm,
    ) -> Result<Group, GroupError> {
        let group = self.get_group(url).await?.ok_or(GroupError::NotFound)?;

        let role = EditorRole::for_actor(actor, Some(&group));
        if role == EditorRole::Member {
            return Err(GroupError::Forbidden(
                "only the curator or a superuser may edit this group".to_string(),
            ));
        }

        let validated = validate_form(&form).map_err(GroupError::Validation)?;
        let restricted =
            policy::resolve(role, &validated.restricted, &RestrictedValues::of_group(&group));
        if restricted.curator_id != group.curator_id {
            self.check_curator(&restricted.curator_id).await?;
        }

        let renamed = validated.name != group.name;
        let updated = apply_edit(&group, &validated, restricted);

        // Slug is stable; a rename only records a fresh alias.
        let new_alias = renamed.then(|| GroupAlias {
            group_id: updated.id.clone(),
            name: updated.name.clone(),
            url: slugify(&updated.name),
        });

        let saved = self
            .groups
            .update(&updated, new_alias.as_ref())
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => GroupError::NameConflict(updated.name.clone()),
                RepositoryError::NotFound => GroupError::NotFound,
                other => GroupError::Storage(other.to_string()),
            })?;

        tracing::info!(group = %saved.url, by = %actor.username, "group updated");
        Ok(saved)
    }

    /// Fetch a group by slug, falling back to historical alias slugs.
    pub async fn get_group(&self, url: &str) -> Result<Option<Group>, GroupError> {
        if let Some(group) = self
            .groups
            .get_by_url(url)
            .await
            .map_err(|e| GroupError::Storage(e.to_string()))?
        {
            return Ok(Some(group));
        }

        let Some(id) = self
            .aliases
            .resolve_url(url)
            .await
            .map_err(|e| GroupError::Storage(e.to_string()))?
        else {
            return Ok(None);
        };

        self.groups
            .get_by_id(&id)
            .await
            .map_err(|e| GroupError::Storage(e.to_string()))
    }

    async fn check_curator(&self, curator: &Option<UserId>) -> Result<(), GroupError> {
        let Some(id) = curator else { return Ok(()) };
        let exists = self
            .users
            .get_by_id(id)
            .await
            .map_err(|e| GroupError::Storage(e.to_string()))?
            .is_some();
        if exists {
            Ok(())
        } else {
            Err(GroupError::Validation(vec![FieldError::new(
                "curator_id",
                "no such user",
            )]))
        }
    }
}

/// Merge validated free-text fields and resolved restricted values over the
/// existing group. Absent free-text fields stay unchanged.
fn apply_edit(group: &Group, validated: &ValidatedForm, restricted: RestrictedValues) -> Group {
    let pick = |submitted: &Option<String>, current: &str| -> String {
        submitted.clone().unwrap_or_else(|| current.to_string())
    };

    Group {
        id: group.id.clone(),
        url: group.url.clone(),
        name: validated.name.clone(),
        description: pick(&validated.description, &group.description),
        irc_channel: pick(&validated.irc_channel, &group.irc_channel),
        website: pick(&validated.website, &group.website),
        wiki: pick(&validated.wiki, &group.wiki),
        new_member_criteria: pick(&validated.new_member_criteria, &group.new_member_criteria),
        accepting_new_members: restricted.accepting_new_members,
        members_can_leave: restricted.members_can_leave,
        visible: restricted.visible,
        functional_area: restricted.functional_area,
        curator_id: restricted.curator_id,
        created_at: group.created_at,
        updated_at: Utc::now(),
    }
}
