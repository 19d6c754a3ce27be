//! Membership toggle handlers.
//!
//! Toggles are POST-only; the router never maps other verbs, so a GET is a
//! 405 with no state inspection. Vouch and closed-group rejections are
//! web-facing no-ops: the browser is redirected back with nothing changed.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;

use commons_types::error::MembershipError;
use commons_types::group::GroupId;

use crate::http::error::AppError;
use crate::http::extractors::actor::Actor;
use crate::http::handlers::group::see_other;
use crate::state::AppState;

/// POST /groups/{id}/toggle - Join or leave a group.
pub async fn toggle_group(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Actor(actor): Actor,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let group_id: GroupId = id
        .parse()
        .map_err(|_| AppError::NotFound("No such group".to_string()))?;

    let fallback = format!("/groups/{id}/");
    match state.membership_service.toggle_group(&actor, &group_id).await {
        Ok(_) => Ok(see_other(&headers, &fallback)),
        // Rejections are silent on the web surface: redirect, no mutation.
        Err(MembershipError::NotVouched) | Err(MembershipError::NotAccepting) => {
            Ok(see_other(&headers, &fallback))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /skills/{url}/toggle - Pick up or drop a skill.
pub async fn toggle_skill(
    State(state): State<AppState>,
    Path(url): Path<String>,
    Actor(actor): Actor,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let fallback = format!("/skills/{url}/");
    match state.membership_service.toggle_skill(&actor, &url).await {
        Ok(_) => Ok(see_other(&headers, &fallback)),
        Err(MembershipError::NotVouched) => Ok(see_other(&headers, &fallback)),
        Err(e) => Err(e.into()),
    }
}
