use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// Fire-and-forget notification payload dispatched on every successful
/// membership change.
///
/// Carries only the affected user's identifier; the downstream consumer
/// (newsletter sync, search reindex, ...) decides what to do with it and owns
/// its own retry behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipEvent {
    pub user: UserId,
}
