//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository/notifier traits, but AppState pins
//! them to the concrete infra implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use commons_core::service::directory::DirectoryService;
use commons_core::service::group::GroupService;
use commons_core::service::membership::MembershipService;
use commons_infra::config::load_global_config;
use commons_infra::notify::MembershipQueue;
use commons_infra::resolve_data_dir;
use commons_infra::sqlite::alias::SqliteGroupAliasRepository;
use commons_infra::sqlite::group::SqliteGroupRepository;
use commons_infra::sqlite::pool::DatabasePool;
use commons_infra::sqlite::skill::SqliteSkillRepository;
use commons_infra::sqlite::user::SqliteUserRepository;
use commons_types::config::GlobalConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteMembershipService =
    MembershipService<SqliteGroupRepository, SqliteSkillRepository, MembershipQueue>;

pub type ConcreteGroupService =
    GroupService<SqliteGroupRepository, SqliteGroupAliasRepository, SqliteUserRepository>;

pub type ConcreteDirectoryService = DirectoryService<SqliteGroupRepository, SqliteSkillRepository>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub membership_service: Arc<ConcreteMembershipService>,
    pub group_service: Arc<ConcreteGroupService>,
    pub directory_service: Arc<ConcreteDirectoryService>,
    pub user_repo: Arc<SqliteUserRepository>,
    pub skill_repo: Arc<SqliteSkillRepository>,
    pub membership_queue: MembershipQueue,
    pub config: GlobalConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to DB, load config, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        Self::init_with_data_dir(&resolve_data_dir()).await
    }

    /// Initialize against an explicit data directory (tests use a temp dir).
    pub async fn init_with_data_dir(data_dir: &Path) -> anyhow::Result<Self> {
        // Ensure data directory exists
        tokio::fs::create_dir_all(data_dir).await?;

        let config = load_global_config(data_dir).await;

        // Initialize database
        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("commons.db").display());
        let db_pool = DatabasePool::new(&db_url).await?;

        let membership_queue = MembershipQueue::new(1024);

        let membership_service = MembershipService::new(
            SqliteGroupRepository::new(db_pool.clone()),
            SqliteSkillRepository::new(db_pool.clone()),
            membership_queue.clone(),
        );

        let group_service = GroupService::new(
            SqliteGroupRepository::new(db_pool.clone()),
            SqliteGroupAliasRepository::new(db_pool.clone()),
            SqliteUserRepository::new(db_pool.clone()),
        );

        let directory_service = DirectoryService::new(
            SqliteGroupRepository::new(db_pool.clone()),
            SqliteSkillRepository::new(db_pool.clone()),
            &config.site_url,
            config.default_page_size,
        );

        Ok(Self {
            membership_service: Arc::new(membership_service),
            group_service: Arc::new(group_service),
            directory_service: Arc::new(directory_service),
            user_repo: Arc::new(SqliteUserRepository::new(db_pool.clone())),
            skill_repo: Arc::new(SqliteSkillRepository::new(db_pool.clone())),
            membership_queue,
            config,
            data_dir: data_dir.to_path_buf(),
            db_pool,
        })
    }
}
