//! Field permission policy for group create/edit.
//!
//! The permission contract is a single explicit table mapping
//! (role, restricted field) to an access level, evaluated once per mutation.
//! Keeping it in one place makes the contract auditable and testable on its
//! own, instead of scattering role conditionals through the mutation path.

use commons_types::group::{Group, MembershipPolicy};
use commons_types::user::{User, UserId};

/// Who is performing a group mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorRole {
    /// A vouched regular user (the only role that can reach create).
    Member,
    /// The group's designated curator (edit only).
    Curator,
    /// Full access to every field.
    Superuser,
}

impl EditorRole {
    /// Classify the actor against the group being edited (None on create).
    pub fn for_actor(actor: &User, group: Option<&Group>) -> Self {
        if actor.is_superuser {
            return EditorRole::Superuser;
        }
        if let Some(group) = group
            && group.curator_id.as_ref() == Some(&actor.id)
        {
            return EditorRole::Curator;
        }
        EditorRole::Member
    }
}

/// The group fields whose writability depends on the actor's role. Free-text
/// fields (name, description, irc_channel, website, wiki, new_member_criteria)
/// are writable by every role and do not appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictedField {
    MembersCanLeave,
    Visible,
    FunctionalArea,
    AcceptingNewMembers,
    CuratorAssignment,
}

/// Outcome of a policy lookup.
///
/// `Forced` means the submitted value is silently ignored and the base value
/// kept: the documented default on create, the group's current value on edit.
/// Silent-ignore (rather than rejection) is intentional, inherited behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAccess {
    Writable,
    Forced,
}

/// The permission table.
pub fn field_access(role: EditorRole, field: RestrictedField) -> FieldAccess {
    match (role, field) {
        (EditorRole::Superuser, _) => FieldAccess::Writable,

        (EditorRole::Curator, RestrictedField::MembersCanLeave) => FieldAccess::Writable,
        (EditorRole::Curator, RestrictedField::Visible) => FieldAccess::Writable,
        (EditorRole::Curator, RestrictedField::AcceptingNewMembers) => FieldAccess::Writable,
        (EditorRole::Curator, RestrictedField::FunctionalArea) => FieldAccess::Forced,
        (EditorRole::Curator, RestrictedField::CuratorAssignment) => FieldAccess::Forced,

        (EditorRole::Member, _) => FieldAccess::Forced,
    }
}

/// The concrete values of the restricted fields on a group.
#[derive(Debug, Clone, PartialEq)]
pub struct RestrictedValues {
    pub members_can_leave: bool,
    pub visible: bool,
    pub functional_area: bool,
    pub accepting_new_members: MembershipPolicy,
    pub curator_id: Option<UserId>,
}

impl RestrictedValues {
    /// The forced defaults every non-superuser-created group gets.
    pub fn creation_defaults() -> Self {
        Self {
            members_can_leave: true,
            visible: true,
            functional_area: false,
            accepting_new_members: MembershipPolicy::ByRequest,
            curator_id: None,
        }
    }

    /// Snapshot of a group's current restricted values (edit base).
    pub fn of_group(group: &Group) -> Self {
        Self {
            members_can_leave: group.members_can_leave,
            visible: group.visible,
            functional_area: group.functional_area,
            accepting_new_members: group.accepting_new_members.clone(),
            curator_id: group.curator_id.clone(),
        }
    }
}

/// Already-validated restricted-field submissions. `None` means the field was
/// absent from the payload and stays at its base value even when writable.
#[derive(Debug, Clone, Default)]
pub struct RestrictedSubmission {
    pub members_can_leave: Option<bool>,
    pub visible: Option<bool>,
    pub functional_area: Option<bool>,
    pub accepting_new_members: Option<MembershipPolicy>,
    pub curator_id: Option<UserId>,
}

/// Merge a submission over the base values, honoring the permission table.
pub fn resolve(
    role: EditorRole,
    submitted: &RestrictedSubmission,
    base: &RestrictedValues,
) -> RestrictedValues {
    let pick_bool = |field: RestrictedField, submitted: Option<bool>, base: bool| -> bool {
        match field_access(role, field) {
            FieldAccess::Writable => submitted.unwrap_or(base),
            FieldAccess::Forced => base,
        }
    };

    let accepting_new_members = match field_access(role, RestrictedField::AcceptingNewMembers) {
        FieldAccess::Writable => submitted
            .accepting_new_members
            .clone()
            .unwrap_or_else(|| base.accepting_new_members.clone()),
        FieldAccess::Forced => base.accepting_new_members.clone(),
    };

    let curator_id = match field_access(role, RestrictedField::CuratorAssignment) {
        FieldAccess::Writable => submitted
            .curator_id
            .clone()
            .or_else(|| base.curator_id.clone()),
        FieldAccess::Forced => base.curator_id.clone(),
    };

    RestrictedValues {
        members_can_leave: pick_bool(
            RestrictedField::MembersCanLeave,
            submitted.members_can_leave,
            base.members_can_leave,
        ),
        visible: pick_bool(RestrictedField::Visible, submitted.visible, base.visible),
        functional_area: pick_bool(
            RestrictedField::FunctionalArea,
            submitted.functional_area,
            base.functional_area,
        ),
        accepting_new_members,
        curator_id,
    }
}
