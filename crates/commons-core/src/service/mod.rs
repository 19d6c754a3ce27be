//! Business-rule services for the membership subsystem.
//!
//! Services are generic over the repository and notifier traits so the web
//! layer, the CLI, and tests can wire whatever implementations they need.

pub mod directory;
pub mod group;
pub mod membership;
pub mod policy;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;
