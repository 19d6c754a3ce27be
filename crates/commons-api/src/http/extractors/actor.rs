//! Acting-user extractor for the web mutation surface.
//!
//! Session mechanics live in an external collaborator; a fronting auth proxy
//! asserts the caller's identity through the `X-User-Id` header. This
//! extractor resolves that id to the local user record.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use commons_core::repository::user::UserRepository;
use commons_types::user::{User, UserId};

use crate::http::error::AppError;
use crate::state::AppState;

/// The authenticated community member performing the request.
pub struct Actor(pub User);

impl FromRequestParts<AppState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .ok_or_else(|| AppError::Unauthorized("Missing X-User-Id header".to_string()))?;

        let id_str = header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid X-User-Id header encoding".to_string()))?;

        let id: UserId = id_str
            .trim()
            .parse()
            .map_err(|_| AppError::Unauthorized("Invalid X-User-Id header".to_string()))?;

        let user = state
            .user_repo
            .get_by_id(&id)
            .await
            .map_err(|e| AppError::Internal(format!("Database error: {e}")))?
            .ok_or_else(|| AppError::Unauthorized("Unknown user".to_string()))?;

        Ok(Actor(user))
    }
}
