//! Query parameter extractors for the directory list endpoints.

use commons_core::repository::{DirectoryOrder, SortOrder};
use commons_core::service::directory::DirectoryQuery;
use serde::Deserialize;

use crate::http::error::AppError;

/// Query parameters for the group/skill directory endpoints.
#[derive(Debug, Deserialize, Default)]
pub struct DirectoryListQuery {
    /// Ordering field (id, name, number_of_members).
    pub order_by: Option<String>,
    /// Sort order (asc, desc).
    pub order: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size (clamped server-side).
    pub page_size: Option<u32>,
    /// Output encoding (json, jsonp).
    pub format: Option<String>,
    /// JSONP callback name.
    pub callback: Option<String>,
}

impl DirectoryListQuery {
    /// Convert to the service-level query, rejecting unknown ordering fields.
    pub fn to_directory_query(&self) -> Result<DirectoryQuery, AppError> {
        let order_by = match self.order_by.as_deref() {
            Some(field) => field
                .parse::<DirectoryOrder>()
                .map_err(AppError::Validation)?,
            None => DirectoryOrder::default(),
        };

        let order = match self.order.as_deref().map(str::to_lowercase).as_deref() {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        };

        Ok(DirectoryQuery {
            order_by,
            order,
            page: self.page.unwrap_or(1),
            page_size: self.page_size,
        })
    }
}
