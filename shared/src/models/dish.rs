//! Dish Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unit attached to calorie values
pub const CALORIES_UNIT: &str = "kcal";
/// Unit attached to protein / carbs / fat values
pub const MASS_UNIT: &str = "g";

/// A numeric nutrition value paired with its unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrient {
    pub value: f64,
    pub unit: String,
}

impl Nutrient {
    pub fn kcal(value: f64) -> Self {
        Self {
            value,
            unit: CALORIES_UNIT.to_string(),
        }
    }

    pub fn grams(value: f64) -> Self {
        Self {
            value,
            unit: MASS_UNIT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub calories: Nutrient,
    pub protein: Nutrient,
    pub carbs: Nutrient,
    pub total_fat: Nutrient,
}

/// One size / price / nutrition variant of a dish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServingInfo {
    pub size: String,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    pub nutrition_facts: NutritionFacts,
}

/// Dish entity, owned by a category or a subcategory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: i64,
    pub dish_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub serving_infos: Vec<ServingInfo>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Raw nutrition numbers as submitted by clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionInput {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub total_fat: f64,
}

/// Serving variant payload (units are attached on normalization)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServingInfoInput {
    pub size: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub nutrition_facts: NutritionInput,
}

impl From<ServingInfoInput> for ServingInfo {
    fn from(input: ServingInfoInput) -> Self {
        let facts = input.nutrition_facts;
        Self {
            size: input.size,
            price: input.price,
            nutrition_facts: NutritionFacts {
                calories: Nutrient::kcal(facts.calories),
                protein: Nutrient::grams(facts.protein),
                carbs: Nutrient::grams(facts.carbs),
                total_fat: Nutrient::grams(facts.total_fat),
            },
        }
    }
}

/// Create dish payload
///
/// Required fields are optional here so that a missing name or an empty
/// serving list is reported as a validation error rather than a decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishCreate {
    #[serde(default)]
    pub dish_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub serving_infos: Option<Vec<ServingInfoInput>>,
}

/// Delete dish payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishDelete {
    #[serde(default)]
    pub dish_id: Option<i64>,
    #[serde(default)]
    pub confirmation_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishDeleted {
    pub dish_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishCount {
    pub total_dishes: u64,
}
