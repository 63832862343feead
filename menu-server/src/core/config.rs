use shared::models::DEFAULT_LOGO_PATH;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | DATABASE_PATH | data/menu.db | SQLite 数据库文件 |
/// | PUBLIC_DIR | public | 静态资源 (logo) 目录 |
/// | DEFAULT_LOGO_PATH | /restaurant-default-logo/restaurantdefaultlogo.webp | 默认 logo |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | (未设置) | 日志文件目录 |
/// | ENFORCE_UNIQUE_RENAME | false | 重命名餐厅/子分类时检查重名 |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 DATABASE_PATH=/tmp/menu.db cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// SQLite 数据库文件路径
    pub database_path: String,
    /// 静态资源根目录
    pub public_dir: String,
    /// 默认 logo 路径
    pub default_logo_path: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志级别
    pub log_level: String,
    /// 是否输出 JSON 日志
    pub log_json: bool,
    /// 日志文件目录
    pub log_dir: Option<String>,
    /// 重命名时是否检查同级重名
    pub enforce_unique_rename: bool,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意 key-value 来源加载配置
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| {
            get(key)
                .and_then(|v| match v.trim().to_ascii_lowercase().as_str() {
                    "1" | "true" | "yes" | "on" => Some(true),
                    "0" | "false" | "no" | "off" => Some(false),
                    _ => None,
                })
                .unwrap_or(false)
        };

        Self {
            http_port: get("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            database_path: get("DATABASE_PATH").unwrap_or_else(|| "data/menu.db".into()),
            public_dir: get("PUBLIC_DIR").unwrap_or_else(|| "public".into()),
            default_logo_path: get("DEFAULT_LOGO_PATH")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_LOGO_PATH.into()),
            environment: get("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: flag("LOG_JSON"),
            log_dir: get("LOG_DIR").filter(|s| !s.is_empty()),
            enforce_unique_rename: flag("ENFORCE_UNIQUE_RENAME"),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(database_path: impl Into<String>, public_dir: impl Into<String>) -> Self {
        let mut config = Self::from_lookup(|_| None);
        config.database_path = database_path.into();
        config.public_dir = public_dir.into();
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
