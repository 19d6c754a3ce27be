//! Business logic and repository trait definitions for Commons.
//!
//! This crate defines the "ports" (repository traits plus the notification
//! capability) that the infrastructure layer implements. It depends only on
//! `commons-types` -- never on `commons-infra` or any database/IO crate.

pub mod notify;
pub mod repository;
pub mod service;
