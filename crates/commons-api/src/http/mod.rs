//! HTTP/REST and web layer for Commons.
//!
//! Axum-based directory read API at `/api/v1/` with app-credential
//! authentication and envelope responses, plus the form-posting web surface
//! for group mutation and membership toggles.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
