//! Request extractors: app-credential auth, acting user, list query params.

pub mod actor;
pub mod auth;
pub mod query;
