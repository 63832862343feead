//! Unified error codes for the menu service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Restaurant errors
//! - 2xxx: Category / subcategory errors
//! - 3xxx: Dish errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Restaurant ====================
    /// Restaurant not found
    RestaurantNotFound = 1001,
    /// Restaurant name already taken
    RestaurantNameExists = 1002,
    /// Destructive operation without the confirmation token
    DeleteConfirmationInvalid = 1003,
    /// Restaurant search matched nothing
    NoMatchingRestaurants = 1004,

    // ==================== 2xxx: Category ====================
    /// Category not found
    CategoryNotFound = 2001,
    /// Category name already used in this restaurant
    CategoryNameExists = 2002,
    /// Subcategory not found
    SubCategoryNotFound = 2101,
    /// Subcategory name already used in this category
    SubCategoryNameExists = 2102,

    // ==================== 3xxx: Dish ====================
    /// Dish not found
    DishNotFound = 3001,
    /// Dish name already used in the owning list
    DishNameExists = 3002,
    /// Dish created without serving information
    ServingInfoRequired = 3003,
    /// Dish search matched nothing
    NoMatchingDishes = 3004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Concurrent writers kept invalidating the loaded document
    WriteConflict = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",

            // Restaurant
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::RestaurantNameExists => "Restaurant already exists",
            ErrorCode::DeleteConfirmationInvalid => "Invalid delete ID",
            ErrorCode::NoMatchingRestaurants => "No matching restaurants found",

            // Category
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryNameExists => "Category already exists",
            ErrorCode::SubCategoryNotFound => "Subcategory not found",
            ErrorCode::SubCategoryNameExists => "Subcategory already exists",

            // Dish
            ErrorCode::DishNotFound => "Dish not found",
            ErrorCode::DishNameExists => "Dish with the same name already exists",
            ErrorCode::ServingInfoRequired => "Serving information is required",
            ErrorCode::NoMatchingDishes => "No matching dishes found in this restaurant",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::WriteConflict => "Document was modified concurrently, please retry",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            // Restaurant
            1001 => Ok(ErrorCode::RestaurantNotFound),
            1002 => Ok(ErrorCode::RestaurantNameExists),
            1003 => Ok(ErrorCode::DeleteConfirmationInvalid),
            1004 => Ok(ErrorCode::NoMatchingRestaurants),

            // Category
            2001 => Ok(ErrorCode::CategoryNotFound),
            2002 => Ok(ErrorCode::CategoryNameExists),
            2101 => Ok(ErrorCode::SubCategoryNotFound),
            2102 => Ok(ErrorCode::SubCategoryNameExists),

            // Dish
            3001 => Ok(ErrorCode::DishNotFound),
            3002 => Ok(ErrorCode::DishNameExists),
            3003 => Ok(ErrorCode::ServingInfoRequired),
            3004 => Ok(ErrorCode::NoMatchingDishes),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),
            9004 => Ok(ErrorCode::WriteConflict),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::RestaurantNotFound.code(), 1001);
        assert_eq!(ErrorCode::CategoryNameExists.code(), 2002);
        assert_eq!(ErrorCode::SubCategoryNotFound.code(), 2101);
        assert_eq!(ErrorCode::DishNameExists.code(), 3002);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_u16() {
        assert_eq!(ErrorCode::try_from(1003), Ok(ErrorCode::DeleteConfirmationInvalid));
        assert_eq!(ErrorCode::try_from(3003), Ok(ErrorCode::ServingInfoRequired));
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(1234), Err(InvalidErrorCode(1234)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::DishNotFound).unwrap();
        assert_eq!(json, "3001");

        let code: ErrorCode = serde_json::from_str("2102").unwrap();
        assert_eq!(code, ErrorCode::SubCategoryNameExists);

        assert!(serde_json::from_str::<ErrorCode>("4242").is_err());
    }

    #[test]
    fn test_messages() {
        assert_eq!(ErrorCode::DeleteConfirmationInvalid.message(), "Invalid delete ID");
        assert_eq!(
            ErrorCode::NoMatchingRestaurants.message(),
            "No matching restaurants found"
        );
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::NotFound.is_success());
    }

    #[test]
    fn test_invalid_error_code_display() {
        let err = InvalidErrorCode(999);
        assert_eq!(format!("{}", err), "invalid error code: 999");
    }
}
