//! 服务层
//!
//! - [`MenuService`] - 餐厅菜单聚合的读写 (读-改-写 + 乐观版本)
//! - [`LogoStore`] - logo 文件清理

pub mod logo_store;
pub mod menu_service;

pub use logo_store::LogoStore;
pub use menu_service::MenuService;
