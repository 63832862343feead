//! Menu tree mutations
//!
//! Pure functions over a loaded [`Restaurant`] aggregate. Each one either
//! applies its change in memory and stamps the touched nodes, or returns a
//! [`MenuError`] leaving the caller free to discard the tree.

use serde_json::Value;
use shared::error::{AppError, ErrorCode};
use shared::models::{Category, DEFAULT_LOGO_PATH, Dish, Restaurant, ServingInfo, SubCategory};
use shared::util::snowflake_id;
use thiserror::Error;

/// Typed failure of a tree mutation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    #[error("Category not found")]
    CategoryNotFound,

    #[error("Subcategory not found")]
    SubCategoryNotFound,

    #[error("Dish not found")]
    DishNotFound,

    #[error("Category already exists")]
    CategoryNameExists,

    #[error("Subcategory already exists")]
    SubCategoryNameExists,

    #[error("Dish with this name already exists")]
    DishNameExists,
}

impl MenuError {
    pub fn code(&self) -> ErrorCode {
        match self {
            MenuError::CategoryNotFound => ErrorCode::CategoryNotFound,
            MenuError::SubCategoryNotFound => ErrorCode::SubCategoryNotFound,
            MenuError::DishNotFound => ErrorCode::DishNotFound,
            MenuError::CategoryNameExists => ErrorCode::CategoryNameExists,
            MenuError::SubCategoryNameExists => ErrorCode::SubCategoryNameExists,
            MenuError::DishNameExists => ErrorCode::DishNameExists,
        }
    }
}

impl From<MenuError> for AppError {
    fn from(err: MenuError) -> Self {
        AppError::new(err.code())
    }
}

/// A validated dish ready to be attached to its target node
#[derive(Debug, Clone)]
pub struct NewDish {
    pub dish_name: String,
    pub description: Option<String>,
    pub serving_infos: Vec<ServingInfo>,
}

/// Build a fresh restaurant with an empty category list
pub fn new_restaurant(
    restaurant_name: String,
    logo: Option<String>,
    description: Option<Value>,
    now: i64,
) -> Restaurant {
    Restaurant {
        id: snowflake_id(),
        restaurant_name,
        logo: logo
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOGO_PATH.to_string()),
        description,
        categories: Vec::new(),
        version: 0,
        created_at: now,
        updated_at: now,
    }
}

/// Apply a partial restaurant update
///
/// Returns the previous logo when it was replaced by a different one.
pub fn edit_restaurant(
    restaurant: &mut Restaurant,
    restaurant_name: Option<String>,
    logo: Option<String>,
    description: Option<Value>,
    now: i64,
) -> Option<String> {
    if let Some(name) = restaurant_name {
        restaurant.restaurant_name = name;
    }
    if let Some(description) = description {
        restaurant.description = Some(description);
    }
    let replaced = match logo {
        Some(logo) if !logo.trim().is_empty() && logo != restaurant.logo => {
            Some(std::mem::replace(&mut restaurant.logo, logo))
        }
        _ => None,
    };
    restaurant.updated_at = now;
    replaced
}

/// Append a category, returning its id
pub fn add_category(
    restaurant: &mut Restaurant,
    category_name: String,
    now: i64,
) -> Result<i64, MenuError> {
    if restaurant
        .categories
        .iter()
        .any(|c| c.category_name == category_name)
    {
        return Err(MenuError::CategoryNameExists);
    }

    let id = snowflake_id();
    restaurant.categories.push(Category {
        id,
        category_name,
        sub_categories: None,
        dishes: Some(Vec::new()),
        created_at: now,
        updated_at: now,
    });
    restaurant.updated_at = now;
    Ok(id)
}

/// Rename a category; the name must not be used by a sibling
pub fn rename_category(
    restaurant: &mut Restaurant,
    category_id: i64,
    new_name: String,
    now: i64,
) -> Result<(), MenuError> {
    if restaurant.find_category(category_id).is_none() {
        return Err(MenuError::CategoryNotFound);
    }
    if restaurant
        .categories
        .iter()
        .any(|c| c.id != category_id && c.category_name == new_name)
    {
        return Err(MenuError::CategoryNameExists);
    }

    let category = restaurant
        .find_category_mut(category_id)
        .ok_or(MenuError::CategoryNotFound)?;
    category.category_name = new_name;
    category.updated_at = now;
    restaurant.updated_at = now;
    Ok(())
}

/// Append a subcategory with an empty dish list
pub fn add_subcategory(
    restaurant: &mut Restaurant,
    category_id: i64,
    sub_category_name: String,
    now: i64,
) -> Result<SubCategory, MenuError> {
    let category = restaurant
        .find_category_mut(category_id)
        .ok_or(MenuError::CategoryNotFound)?;

    let subs = category.sub_categories.get_or_insert_with(Vec::new);
    if subs.iter().any(|s| s.sub_category_name == sub_category_name) {
        return Err(MenuError::SubCategoryNameExists);
    }

    let sub = SubCategory {
        id: snowflake_id(),
        sub_category_name,
        dishes: Vec::new(),
        created_at: now,
        updated_at: now,
    };
    subs.push(sub.clone());
    category.updated_at = now;
    restaurant.updated_at = now;
    Ok(sub)
}

/// Rename a subcategory
///
/// Sibling uniqueness is only checked when `enforce_unique` is set.
pub fn rename_subcategory(
    restaurant: &mut Restaurant,
    category_id: i64,
    sub_category_id: i64,
    new_name: String,
    enforce_unique: bool,
    now: i64,
) -> Result<SubCategory, MenuError> {
    let category = restaurant
        .find_category_mut(category_id)
        .ok_or(MenuError::CategoryNotFound)?;
    let subs = category
        .sub_categories
        .as_mut()
        .ok_or(MenuError::SubCategoryNotFound)?;

    if !subs.iter().any(|s| s.id == sub_category_id) {
        return Err(MenuError::SubCategoryNotFound);
    }
    if enforce_unique
        && subs
            .iter()
            .any(|s| s.id != sub_category_id && s.sub_category_name == new_name)
    {
        return Err(MenuError::SubCategoryNameExists);
    }

    let sub = subs
        .iter_mut()
        .find(|s| s.id == sub_category_id)
        .ok_or(MenuError::SubCategoryNotFound)?;
    sub.sub_category_name = new_name;
    sub.updated_at = now;
    let renamed = sub.clone();

    category.updated_at = now;
    restaurant.updated_at = now;
    Ok(renamed)
}

/// Attach a dish to its target node (the subcategory when given, else the category)
pub fn add_dish(
    restaurant: &mut Restaurant,
    category_id: i64,
    sub_category_id: Option<i64>,
    new_dish: NewDish,
    now: i64,
) -> Result<Dish, MenuError> {
    with_target_dishes(restaurant, category_id, sub_category_id, now, |dishes| {
        if dishes.iter().any(|d| d.dish_name == new_dish.dish_name) {
            return Err(MenuError::DishNameExists);
        }
        let dish = Dish {
            id: snowflake_id(),
            dish_name: new_dish.dish_name,
            description: new_dish.description,
            serving_infos: new_dish.serving_infos,
            created_at: now,
            updated_at: now,
        };
        dishes.push(dish.clone());
        Ok(dish)
    })
}

/// Detach a dish from its target node, returning it
pub fn remove_dish(
    restaurant: &mut Restaurant,
    category_id: i64,
    sub_category_id: Option<i64>,
    dish_id: i64,
    now: i64,
) -> Result<Dish, MenuError> {
    with_target_dishes(restaurant, category_id, sub_category_id, now, |dishes| {
        let pos = dishes
            .iter()
            .position(|d| d.id == dish_id)
            .ok_or(MenuError::DishNotFound)?;
        Ok(dishes.remove(pos))
    })
}

/// Resolve the dish list of a target node and run `f` on it, stamping the
/// target, its category and the restaurant on success.
fn with_target_dishes<T>(
    restaurant: &mut Restaurant,
    category_id: i64,
    sub_category_id: Option<i64>,
    now: i64,
    f: impl FnOnce(&mut Vec<Dish>) -> Result<T, MenuError>,
) -> Result<T, MenuError> {
    let category = restaurant
        .find_category_mut(category_id)
        .ok_or(MenuError::CategoryNotFound)?;

    let out = match sub_category_id {
        Some(sub_id) => {
            let sub = category
                .sub_categories
                .as_mut()
                .and_then(|subs| subs.iter_mut().find(|s| s.id == sub_id))
                .ok_or(MenuError::SubCategoryNotFound)?;
            let out = f(&mut sub.dishes)?;
            sub.updated_at = now;
            out
        }
        None => f(category.dishes.get_or_insert_with(Vec::new))?,
    };

    category.updated_at = now;
    restaurant.updated_at = now;
    Ok(out)
}
