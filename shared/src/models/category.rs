//! Category Model
//!
//! Categories and subcategories are embedded in their restaurant document and
//! are never addressed on their own.

use serde::{Deserialize, Serialize};

use super::dish::Dish;

/// Subcategory entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCategory {
    pub id: i64,
    pub sub_category_name: String,
    #[serde(default)]
    pub dishes: Vec<Dish>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Category entity
///
/// Both lists are optional: a fresh category carries an empty dish list and
/// no subcategory list until the first subcategory is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub category_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_categories: Option<Vec<SubCategory>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dishes: Option<Vec<Dish>>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Category {
    /// Direct dishes of this category (empty when the list was never created)
    pub fn direct_dishes(&self) -> &[Dish] {
        self.dishes.as_deref().unwrap_or_default()
    }

    /// Subcategories of this category (empty when the list was never created)
    pub fn subcategories(&self) -> &[SubCategory] {
        self.sub_categories.as_deref().unwrap_or_default()
    }
}

/// Create category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryCreate {
    #[serde(default)]
    pub category_name: Option<String>,
}

/// Rename category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    #[serde(default)]
    pub new_category_name: Option<String>,
}

/// Create / rename subcategory payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubCategoryPayload {
    #[serde(default)]
    pub sub_category_name: Option<String>,
}

/// Result of a category creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreated {
    pub categories: Vec<Category>,
    pub new_category_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_category_serialization() {
        let category = Category {
            id: 1,
            category_name: "Drinks".to_string(),
            sub_categories: None,
            dishes: Some(Vec::new()),
            created_at: 10,
            updated_at: 10,
        };
        let json = serde_json::to_value(&category).unwrap();
        assert!(json.get("sub_categories").is_none());
        assert_eq!(json["dishes"], serde_json::json!([]));
    }

    #[test]
    fn test_accessors_on_missing_lists() {
        let json = r#"{"id":1,"category_name":"Mains","created_at":1,"updated_at":1}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert!(category.direct_dishes().is_empty());
        assert!(category.subcategories().is_empty());
    }
}
