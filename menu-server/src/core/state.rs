//! 服务器状态
//!
//! 所有 handler 共享的状态，克隆开销很小 (内部都是连接池/Arc)。

use crate::core::{Config, Result};
use crate::db::DbService;
use crate::db::repository::RestaurantRepository;
use crate::services::{LogoStore, MenuService};

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub menu: MenuService,
}

impl ServerState {
    /// 打开数据库并构建服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self::with_db(config.clone(), db))
    }

    /// 使用内存数据库 (测试)
    pub async fn in_memory(config: Config) -> Result<Self> {
        let db = DbService::in_memory().await?;
        Ok(Self::with_db(config, db))
    }

    fn with_db(config: Config, db: DbService) -> Self {
        let logos = LogoStore::new(&config.public_dir, config.default_logo_path.clone());
        let menu = MenuService::new(
            RestaurantRepository::new(db.pool.clone()),
            logos,
            config.enforce_unique_rename,
        );
        Self { config, db, menu }
    }
}
