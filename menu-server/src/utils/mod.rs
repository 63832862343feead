//! 工具模块 - 通用工具函数和类型
//!
//! - [`logger`] - 日志初始化
//! - [`validation`] - 输入校验
//! - [`extract`] - 请求提取器

pub mod extract;
pub mod logger;
pub mod validation;

pub use extract::ValidJson;

// Re-export unified error types from shared
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
