//! App credential authentication extractor for the directory read API.
//!
//! Extracts and verifies pre-shared credentials from:
//! - `Authorization: Bearer <key>` header
//! - `X-API-Key: <key>` header
//!
//! Keys are SHA-256 hashed and compared against the `api_clients` table.
//! Authorization (the `is_official` flag) is the handler's concern.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sha2::{Digest, Sha256};
use sqlx::Row;

use crate::http::error::AppError;
use crate::state::AppState;

/// Authenticated API consumer. Extracting this validates the credential.
pub struct ApiClient {
    pub id: String,
    pub name: String,
    /// Official consumers may read the directory; others are rejected with 403.
    pub is_official: bool,
}

impl FromRequestParts<AppState> for ApiClient {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let api_key = extract_api_key(parts)?;
        let key_hash = hash_api_key(&api_key);

        let result = sqlx::query("SELECT id, name, is_official FROM api_clients WHERE key_hash = ?")
            .bind(&key_hash)
            .fetch_optional(&state.db_pool.reader)
            .await
            .map_err(|e| AppError::Internal(format!("Database error: {e}")))?;

        match result {
            Some(row) => {
                let id: String = row.get("id");
                let name: String = row.get("name");
                let is_official: bool = row.get("is_official");

                // Update last_used_at (best effort, don't fail the request)
                let now = chrono::Utc::now().to_rfc3339();
                let _ = sqlx::query("UPDATE api_clients SET last_used_at = ? WHERE id = ?")
                    .bind(&now)
                    .bind(&id)
                    .execute(&state.db_pool.writer)
                    .await;

                Ok(ApiClient {
                    id,
                    name,
                    is_official,
                })
            }
            None => Err(AppError::Unauthorized(
                "Invalid app credential. Provide a valid key via 'Authorization: Bearer <key>' or 'X-API-Key: <key>' header.".to_string(),
            )),
        }
    }
}

/// Extract the API key from request headers.
fn extract_api_key(parts: &Parts) -> Result<String, AppError> {
    // Try Authorization: Bearer <key>
    if let Some(auth) = parts.headers.get("authorization") {
        let auth_str = auth.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid Authorization header encoding".to_string())
        })?;
        if let Some(key) = auth_str.strip_prefix("Bearer ") {
            return Ok(key.trim().to_string());
        }
    }

    // Try X-API-Key header
    if let Some(key) = parts.headers.get("x-api-key") {
        let key_str = key
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid X-API-Key header encoding".to_string()))?;
        return Ok(key_str.trim().to_string());
    }

    Err(AppError::Unauthorized(
        "Missing app credential. Provide via 'Authorization: Bearer <key>' or 'X-API-Key: <key>' header.".to_string(),
    ))
}

/// Compute SHA-256 hash of an API key (lowercase hex).
pub fn hash_api_key(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    format!("{:x}", digest)
}

/// Ensure an official app credential exists, generating one if the table is
/// empty.
///
/// Returns the plaintext key (shown to the operator once) on first creation.
pub async fn ensure_api_client(state: &AppState) -> anyhow::Result<String> {
    let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM api_clients LIMIT 1")
        .fetch_optional(&state.db_pool.reader)
        .await?;

    if existing.is_some() {
        return Ok("(existing credential - shown only on first creation)".to_string());
    }

    use rand::RngCore;
    let mut key_bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut key_bytes);
    let plaintext_key = format!(
        "commons_{}",
        key_bytes
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<String>()
    );

    let key_hash = hash_api_key(&plaintext_key);
    let id = uuid::Uuid::now_v7().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        "INSERT INTO api_clients (id, key_hash, name, is_official, created_at) VALUES (?, ?, 'default', 1, ?)",
    )
    .bind(&id)
    .bind(&key_hash)
    .bind(&now)
    .execute(&state.db_pool.writer)
    .await?;

    Ok(plaintext_key)
}
