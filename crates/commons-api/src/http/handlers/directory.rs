//! Directory read API handlers.
//!
//! Both endpoints require an authenticated official consumer. Counts in the
//! payload are live aggregates, so the response is marked uncacheable.

use axum::extract::{Query, State};
use axum::response::Response;

use commons_types::directory::DirectoryPage;

use crate::http::error::AppError;
use crate::http::extractors::auth::ApiClient;
use crate::http::extractors::query::DirectoryListQuery;
use crate::http::response::{directory_response, ApiResponse, DirectoryFormat, PaginationMeta};
use crate::state::AppState;

/// GET /api/v1/groups - List groups with live member counts.
pub async fn list_groups(
    State(state): State<AppState>,
    client: ApiClient,
    Query(query): Query<DirectoryListQuery>,
) -> Result<Response, AppError> {
    require_official(&client)?;
    let format = DirectoryFormat::resolve(query.format.as_deref(), query.callback.as_deref())?;
    let directory_query = query.to_directory_query()?;

    let page = state.directory_service.list_groups(directory_query).await?;

    Ok(render(page, format, "/api/v1/groups"))
}

/// GET /api/v1/skills - List skills with live vouched member counts.
pub async fn list_skills(
    State(state): State<AppState>,
    client: ApiClient,
    Query(query): Query<DirectoryListQuery>,
) -> Result<Response, AppError> {
    require_official(&client)?;
    let format = DirectoryFormat::resolve(query.format.as_deref(), query.callback.as_deref())?;
    let directory_query = query.to_directory_query()?;

    let page = state.directory_service.list_skills(directory_query).await?;

    Ok(render(page, format, "/api/v1/skills"))
}

fn require_official(client: &ApiClient) -> Result<(), AppError> {
    if client.is_official {
        Ok(())
    } else {
        tracing::warn!(client = %client.name, "non-official consumer rejected");
        Err(AppError::Forbidden(
            "Only official consumers may read the directory".to_string(),
        ))
    }
}

fn render(page: DirectoryPage, format: DirectoryFormat, self_link: &str) -> Response {
    let pagination = PaginationMeta {
        page: page.page,
        page_size: page.page_size,
        total_count: page.total_count,
        total_pages: page.total_pages() as i64,
    };

    let envelope = ApiResponse::success(page.entries)
        .with_pagination(pagination)
        .with_link("self", self_link);

    directory_response(envelope, format)
}
