//! Restaurant Model
//!
//! The restaurant is the aggregate root: its categories, subcategories and
//! dishes are stored and written back as one document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::category::Category;

/// Logo reference used when none is supplied
pub const DEFAULT_LOGO_PATH: &str = "/restaurant-default-logo/restaurantdefaultlogo.webp";

/// Literal that must accompany every destructive request
pub const DELETE_CONFIRMATION: &str = "delete";

/// Fixed page size of the restaurant listing
pub const RESTAURANT_PAGE_SIZE: u32 = 20;

/// Restaurant aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub restaurant_name: String,
    pub logo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Optimistic concurrency counter, bumped on every write
    #[serde(default)]
    pub version: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Restaurant {
    pub fn find_category(&self, category_id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    pub fn find_category_mut(&mut self, category_id: i64) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == category_id)
    }
}

/// Create restaurant payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantCreate {
    #[serde(default)]
    pub restaurant_name: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub description: Option<Value>,
}

/// Update restaurant payload (absent fields are left unchanged)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantUpdate {
    #[serde(default)]
    pub restaurant_name: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub description: Option<Value>,
}

/// Delete restaurant payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantDelete {
    #[serde(default)]
    pub confirmation_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantDeleted {
    pub restaurant_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCount {
    pub total_restaurants: u64,
}

/// Query string of the restaurant listing
///
/// `page` is kept as text: anything that is not a number means the first page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestaurantListQuery {
    pub page: Option<String>,
    pub search: Option<String>,
}

impl RestaurantListQuery {
    pub fn page_number(&self) -> Option<i64> {
        self.page.as_deref().and_then(|p| p.trim().parse().ok())
    }
}

/// Query string of the search endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}
