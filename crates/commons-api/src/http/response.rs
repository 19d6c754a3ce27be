//! Envelope response format for the directory read API.
//!
//! Every response is wrapped in a consistent envelope:
//! ```json
//! {
//!   "data": [ ... ],
//!   "meta": { "request_id": "...", "timestamp": "...", "pagination": { ... } },
//!   "errors": [],
//!   "_links": { "self": "..." }
//! }
//! ```
//!
//! Directory responses additionally support JSONP (`format=jsonp` with a
//! validated `callback`) and always carry `Cache-Control: max-age=0` so
//! consumers see live member counts.

use std::collections::HashMap;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::http::error::AppError;

/// Envelope response wrapping all API data.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// The main response payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Request metadata.
    pub meta: ApiMeta,

    /// Error list (empty on success).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiErrorDetail>,

    /// HATEOAS-style links for discoverability.
    #[serde(rename = "_links", skip_serializing_if = "HashMap::is_empty")]
    pub links: HashMap<String, String>,
}

/// Metadata included in every response.
#[derive(Debug, Serialize)]
pub struct ApiMeta {
    /// Unique request identifier for tracing.
    pub request_id: String,
    /// ISO-8601 timestamp of the response.
    pub timestamp: String,
    /// Page window for list responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

/// Page window metadata for list responses.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_count: i64,
    pub total_pages: i64,
}

/// Individual error detail.
#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional context (per-field validation errors).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response with data.
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            meta: ApiMeta {
                request_id: uuid::Uuid::now_v7().to_string(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                pagination: None,
            },
            errors: Vec::new(),
            links: HashMap::new(),
        }
    }

    /// Attach page window metadata.
    pub fn with_pagination(mut self, pagination: PaginationMeta) -> Self {
        self.meta.pagination = Some(pagination);
        self
    }

    /// Add a HATEOAS link.
    pub fn with_link(mut self, rel: &str, href: &str) -> Self {
        self.links.insert(rel.to_string(), href.to_string());
        self
    }
}

/// Output encoding for the directory read API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryFormat {
    Json,
    Jsonp { callback: String },
}

impl DirectoryFormat {
    /// Resolve the `format`/`callback` query parameters.
    ///
    /// JSONP callbacks are restricted to identifier characters (plus dots) so
    /// a crafted callback cannot inject script into the padding.
    pub fn resolve(
        format: Option<&str>,
        callback: Option<&str>,
    ) -> Result<Self, AppError> {
        match format.unwrap_or("json") {
            "json" => Ok(DirectoryFormat::Json),
            "jsonp" => {
                let callback = callback.unwrap_or("callback");
                if callback.is_empty() || !is_valid_callback(callback) {
                    return Err(AppError::Validation(format!(
                        "invalid JSONP callback: '{callback}'"
                    )));
                }
                Ok(DirectoryFormat::Jsonp {
                    callback: callback.to_string(),
                })
            }
            other => Err(AppError::Validation(format!(
                "unsupported format: '{other}'"
            ))),
        }
    }
}

fn is_valid_callback(callback: &str) -> bool {
    let mut chars = callback.chars();
    let first = chars.next().unwrap_or(' ');
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.')
}

/// Render an envelope as a directory response in the requested format.
///
/// `Cache-Control: max-age=0` on every response: member counts are live and
/// must not be served stale by intermediaries.
pub fn directory_response<T: Serialize>(
    envelope: ApiResponse<T>,
    format: DirectoryFormat,
) -> Response {
    let json = serde_json::to_string(&envelope).unwrap_or_else(|_| {
        r#"{"errors":[{"code":"SERIALIZATION_ERROR","message":"Failed to serialize response"}]}"#
            .to_string()
    });

    let (content_type, body) = match format {
        DirectoryFormat::Json => ("application/json", json),
        DirectoryFormat::Jsonp { callback } => {
            ("application/javascript", format!("{callback}({json})"))
        }
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "max-age=0"),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_defaults_to_json() {
        assert_eq!(
            DirectoryFormat::resolve(None, None).unwrap(),
            DirectoryFormat::Json
        );
    }

    #[test]
    fn jsonp_requires_clean_callback() {
        let ok = DirectoryFormat::resolve(Some("jsonp"), Some("my.handler_1")).unwrap();
        assert_eq!(
            ok,
            DirectoryFormat::Jsonp {
                callback: "my.handler_1".to_string()
            }
        );

        assert!(DirectoryFormat::resolve(Some("jsonp"), Some("alert(1);//")).is_err());
        assert!(DirectoryFormat::resolve(Some("jsonp"), Some("1leading")).is_err());
        assert!(DirectoryFormat::resolve(Some("jsonp"), Some("")).is_err());
    }

    #[test]
    fn jsonp_callback_defaults_when_absent() {
        let format = DirectoryFormat::resolve(Some("jsonp"), None).unwrap();
        assert_eq!(
            format,
            DirectoryFormat::Jsonp {
                callback: "callback".to_string()
            }
        );
    }

    #[test]
    fn unknown_format_rejected() {
        assert!(DirectoryFormat::resolve(Some("xml"), None).is_err());
    }
}
