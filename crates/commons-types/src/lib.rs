//! Shared domain types for Commons.
//!
//! This crate contains the core domain types used across the Commons
//! community directory: User, Group, Skill, directory entries, membership
//! events, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod directory;
pub mod error;
pub mod event;
pub mod group;
pub mod skill;
pub mod user;
