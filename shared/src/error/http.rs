//! HTTP status code mapping for error codes
//!
//! Name conflicts are reported as 400, not 409: clients treat a duplicate name
//! like any other rejected input.

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::RestaurantNotFound
            | Self::NoMatchingRestaurants
            | Self::CategoryNotFound
            | Self::SubCategoryNotFound
            | Self::DishNotFound
            | Self::NoMatchingDishes => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            Self::Unknown
            | Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::WriteConflict => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation, confirmation, duplicate names)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
