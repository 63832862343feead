//! Menu Server - 餐厅菜单管理后端
//!
//! # 架构概述
//!
//! 每个餐厅是一个聚合文档 (餐厅 → 分类 → 子分类 → 菜品 → 规格/营养)，
//! 整体存放在 SQLite 的一行 JSON 中。所有写操作都是：加载整棵树 →
//! 纯函数修改 → 按版本号条件写回。
//!
//! # 模块结构
//!
//! ```text
//! menu-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── db/            # SQLite 连接池和仓储
//! ├── menu/          # 菜单树的纯函数 (修改 / 查询)
//! ├── services/      # MenuService, LogoStore
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、校验、提取器
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod menu;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState, build_app, build_router};
pub use services::{LogoStore, MenuService};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 按配置初始化日志
pub fn setup_environment(config: &Config) {
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
}

pub fn print_banner() {
    println!(
        r#"
    __  ___
   /  |/  /__  ____  __  __
  / /|_/ / _ \/ __ \/ / / /
 / /  / /  __/ / / / /_/ /
/_/  /_/\___/_/ /_/\__,_/
    "#
    );
}
