//! Shared types for the menu service
//!
//! Domain models, request payloads, error types, response structures and
//! utilities used by the server and its clients.

pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use response::PaginatedResponse;
