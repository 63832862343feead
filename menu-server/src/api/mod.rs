//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`restaurants`] - 餐厅管理接口
//! - [`categories`] - 分类/子分类管理接口
//! - [`dishes`] - 菜品管理、列表与搜索接口
//! - [`stats`] - 统计接口
//! - [`middleware`] - 请求日志中间件

pub mod middleware;

pub mod categories;
pub mod dishes;
pub mod health;
pub mod restaurants;
pub mod stats;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};
