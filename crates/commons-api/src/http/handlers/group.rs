//! Group create/edit handlers for the form-posting web surface.
//!
//! Successful mutations answer with a 303 redirect, preferring the Referer
//! and falling back to the group's canonical page. Validation failures are a
//! 400 with per-field errors; permission failures a 403.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;

use commons_types::group::GroupForm;

use crate::http::error::AppError;
use crate::http::extractors::actor::Actor;
use crate::state::AppState;

/// POST /groups - Create a new group.
pub async fn create_group(
    State(state): State<AppState>,
    Actor(actor): Actor,
    headers: HeaderMap,
    Form(form): Form<GroupForm>,
) -> Result<Response, AppError> {
    let group = state.group_service.create_group(&actor, form).await?;

    Ok(see_other(&headers, &format!("/groups/{}/", group.url)))
}

/// POST /groups/{url}/edit - Edit an existing group.
///
/// Historical slugs resolve through the alias table before 404ing.
pub async fn edit_group(
    State(state): State<AppState>,
    Path(url): Path<String>,
    Actor(actor): Actor,
    headers: HeaderMap,
    Form(form): Form<GroupForm>,
) -> Result<Response, AppError> {
    let group = state.group_service.edit_group(&actor, &url, form).await?;

    Ok(see_other(&headers, &format!("/groups/{}/", group.url)))
}

/// 303 redirect to the Referer when present, else to `fallback`.
pub(crate) fn see_other(headers: &HeaderMap, fallback: &str) -> Response {
    let target = headers
        .get("referer")
        .and_then(|v| v.to_str().ok())
        .unwrap_or(fallback);
    Redirect::to(target).into_response()
}
