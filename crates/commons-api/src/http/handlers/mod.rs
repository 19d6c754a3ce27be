//! HTTP request handlers.

pub mod directory;
pub mod group;
pub mod membership;
