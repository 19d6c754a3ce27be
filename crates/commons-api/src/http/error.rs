//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use commons_types::error::{DirectoryError, GroupError, MembershipError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Membership toggle errors.
    Membership(MembershipError),
    /// Group create/edit errors.
    Group(GroupError),
    /// Directory read errors.
    Directory(DirectoryError),
    /// Authentication failure.
    Unauthorized(String),
    /// Authorization failure.
    Forbidden(String),
    /// Validation error outside the group form path.
    Validation(String),
    /// Target does not exist.
    NotFound(String),
    /// Generic internal error.
    Internal(String),
}

impl From<MembershipError> for AppError {
    fn from(e: MembershipError) -> Self {
        AppError::Membership(e)
    }
}

impl From<GroupError> for AppError {
    fn from(e: GroupError) -> Self {
        AppError::Group(e)
    }
}

impl From<DirectoryError> for AppError {
    fn from(e: DirectoryError) -> Self {
        AppError::Directory(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::Membership(MembershipError::NotFound) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Target not found".to_string(),
                None,
            ),
            AppError::Membership(MembershipError::NotVouched) => (
                StatusCode::FORBIDDEN,
                "NOT_VOUCHED",
                "Only vouched users may join".to_string(),
                None,
            ),
            AppError::Membership(MembershipError::NotAccepting) => (
                StatusCode::FORBIDDEN,
                "NOT_ACCEPTING",
                "Group is not accepting new members".to_string(),
                None,
            ),
            AppError::Membership(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "MEMBERSHIP_ERROR",
                e.to_string(),
                None,
            ),
            AppError::Group(GroupError::NotFound) => (
                StatusCode::NOT_FOUND,
                "GROUP_NOT_FOUND",
                "Group not found".to_string(),
                None,
            ),
            AppError::Group(GroupError::Forbidden(msg)) => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone(), None)
            }
            AppError::Group(GroupError::NameConflict(name)) => (
                StatusCode::CONFLICT,
                "NAME_CONFLICT",
                format!("Name '{name}' is already taken"),
                None,
            ),
            AppError::Group(GroupError::Validation(fields)) => {
                let details = fields
                    .iter()
                    .map(|f| json!({ "field": f.field, "message": f.message }))
                    .collect::<Vec<_>>();
                (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "Validation failed".to_string(),
                    Some(json!(details)),
                )
            }
            AppError::Group(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "GROUP_ERROR",
                e.to_string(),
                None,
            ),
            AppError::Directory(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DIRECTORY_ERROR",
                e.to_string(),
                None,
            ),
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone(), None)
            }
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone(), None),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                None,
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
                None,
            ),
        };

        let body = json!({
            "data": null,
            "meta": {
                "request_id": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
            },
            "errors": [{
                "code": code,
                "message": message,
                "details": details,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
