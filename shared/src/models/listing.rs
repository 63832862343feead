//! Read-side projections of the menu tree

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::dish::Dish;

/// Minimal restaurant identity attached to listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRef {
    pub id: i64,
    pub name: String,
}

/// A dish annotated with its owners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatDish {
    #[serde(flatten)]
    pub dish: Dish,
    pub restaurant_name: String,
    pub category_id: i64,
    pub category_name: String,
    /// `None` when the dish belongs directly to the category
    pub sub_category_id: Option<i64>,
    pub sub_category_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCategoryIndex {
    pub id: i64,
    pub sub_category_name: String,
}

/// Category/subcategory names without their dishes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryIndex {
    pub id: i64,
    pub category_name: String,
    pub sub_categories: Vec<SubCategoryIndex>,
}

impl From<&Category> for CategoryIndex {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            category_name: category.category_name.clone(),
            sub_categories: category
                .subcategories()
                .iter()
                .map(|sub| SubCategoryIndex {
                    id: sub.id,
                    sub_category_name: sub.sub_category_name.clone(),
                })
                .collect(),
        }
    }
}

/// All dishes of one restaurant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishListing {
    pub restaurant: RestaurantRef,
    pub dishes: Vec<FlatDish>,
    pub categories: Vec<CategoryIndex>,
}

/// One contribution to a dish search
///
/// Contributions are not deduplicated: the same dish can show up inside a
/// group and again on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DishSearchHit {
    /// Category name matched; carries the category's direct dishes
    CategoryGroup {
        category_id: i64,
        category_name: String,
        matches: Vec<Dish>,
    },
    /// Subcategory name matched; carries the subcategory's dishes
    SubCategoryGroup {
        category_id: i64,
        category_name: String,
        sub_category_id: i64,
        sub_category_name: String,
        matches: Vec<Dish>,
    },
    /// Dish name matched
    Dish {
        category_id: i64,
        category_name: String,
        sub_category_id: Option<i64>,
        sub_category_name: Option<String>,
        dish: Dish,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishSearchResults {
    pub results: Vec<DishSearchHit>,
}
