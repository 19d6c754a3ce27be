//! Notification capability for membership changes.
//!
//! Dispatch is fire-and-forget: the trait method is synchronous and must
//! never block or fail the commit path. Delivery, retry, and dropping are the
//! implementing collaborator's concern (commons-infra provides a broadcast
//! queue implementation).

use commons_types::user::UserId;

/// Injected capability invoked exactly once per successful membership
/// add-or-remove, after the row is durably committed.
pub trait MembershipNotifier: Send + Sync {
    /// Signal that `user`'s membership set changed.
    fn membership_changed(&self, user: &UserId);
}

/// No-op notifier for contexts with no downstream consumers (CLI provisioning).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl MembershipNotifier for NullNotifier {
    fn membership_changed(&self, _user: &UserId) {}
}
