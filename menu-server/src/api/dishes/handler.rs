//! Dish API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, ValidJson};
use shared::models::{
    Dish, DishCreate, DishDelete, DishDeleted, DishListing, DishSearchResults, SearchQuery,
};

fn created(dish: Dish) -> (StatusCode, Json<ApiResponse<Dish>>) {
    (
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Dish created successfully",
            dish,
        )),
    )
}

fn deleted(result: DishDeleted) -> Json<ApiResponse<DishDeleted>> {
    Json(ApiResponse::success_with_message(
        "Dish deleted successfully",
        result,
    ))
}

/// POST /api/categories/{category_id}/dishes - 在分类下创建菜品
pub async fn create(
    State(state): State<ServerState>,
    Path(category_id): Path<i64>,
    ValidJson(payload): ValidJson<DishCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Dish>>)> {
    let dish = state.menu.create_dish(category_id, None, payload).await?;
    Ok(created(dish))
}

/// POST /api/categories/{category_id}/subcategories/{sub_category_id}/dishes - 在子分类下创建菜品
pub async fn create_in_sub(
    State(state): State<ServerState>,
    Path((category_id, sub_category_id)): Path<(i64, i64)>,
    ValidJson(payload): ValidJson<DishCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Dish>>)> {
    let dish = state
        .menu
        .create_dish(category_id, Some(sub_category_id), payload)
        .await?;
    Ok(created(dish))
}

/// DELETE /api/restaurants/{restaurant_id}/categories/{category_id}/dishes - 删除分类下的菜品
pub async fn delete(
    State(state): State<ServerState>,
    Path((restaurant_id, category_id)): Path<(i64, i64)>,
    ValidJson(payload): ValidJson<DishDelete>,
) -> AppResult<Json<ApiResponse<DishDeleted>>> {
    let result = state
        .menu
        .delete_dish(restaurant_id, category_id, None, payload)
        .await?;
    Ok(deleted(result))
}

/// DELETE .../subcategories/{sub_category_id}/dishes - 删除子分类下的菜品
pub async fn delete_in_sub(
    State(state): State<ServerState>,
    Path((restaurant_id, category_id, sub_category_id)): Path<(i64, i64, i64)>,
    ValidJson(payload): ValidJson<DishDelete>,
) -> AppResult<Json<ApiResponse<DishDeleted>>> {
    let result = state
        .menu
        .delete_dish(restaurant_id, category_id, Some(sub_category_id), payload)
        .await?;
    Ok(deleted(result))
}

/// GET /api/restaurants/{restaurant_id}/dishes - 餐厅全部菜品 (平铺)
pub async fn list(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
) -> AppResult<Json<ApiResponse<DishListing>>> {
    let listing = state.menu.list_dishes(restaurant_id).await?;
    let message = if listing.dishes.is_empty() {
        "No dishes found for this restaurant"
    } else {
        "Dishes fetched successfully"
    };
    Ok(Json(ApiResponse::success_with_message(message, listing)))
}

/// GET /api/restaurants/{restaurant_id}/dishes/search?query= - 餐厅内搜索
pub async fn search(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<DishSearchResults>>> {
    let results = state.menu.search_dishes(restaurant_id, query.query).await?;
    Ok(Json(ApiResponse::success(results)))
}
