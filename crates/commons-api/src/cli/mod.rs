//! CLI command definitions and dispatch for the `commons` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a verb-noun
//! pattern (e.g., `commons create user`, `commons list groups`). Users and
//! skills are provisioned here, never through the web layer.

pub mod directory;
pub mod skill;
pub mod status;
pub mod user;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Manage the community directory.
#[derive(Parser)]
#[command(name = "commons", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new resource.
    Create {
        #[command(subcommand)]
        resource: CreateResource,
    },

    /// List resources.
    #[command(alias = "ls")]
    List {
        #[command(subcommand)]
        resource: ListResource,
    },

    /// System status dashboard.
    Status,

    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "8320")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CreateResource {
    /// Provision a user record.
    User {
        /// Unique login name from the identity provider.
        username: String,

        /// Mark the user as vouched.
        #[arg(long)]
        vouched: bool,

        /// Grant superuser privileges.
        #[arg(long)]
        superuser: bool,
    },

    /// Provision a skill.
    Skill {
        /// Skill display name.
        name: String,
    },
}

#[derive(Subcommand)]
pub enum ListResource {
    /// List groups with live member counts.
    Groups {
        /// Ordering field (id, name, number_of_members).
        #[arg(long, default_value = "id")]
        order_by: String,

        /// Sort order (asc, desc).
        #[arg(long, default_value = "asc")]
        order: String,
    },

    /// List skills with live vouched member counts.
    Skills {
        /// Ordering field (id, name, number_of_members).
        #[arg(long, default_value = "id")]
        order_by: String,

        /// Sort order (asc, desc).
        #[arg(long, default_value = "asc")]
        order: String,
    },
}
