//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, ValidJson};
use shared::PaginatedResponse;
use shared::models::{
    Restaurant, RestaurantCreate, RestaurantDelete, RestaurantDeleted, RestaurantListQuery,
    RestaurantUpdate, SearchQuery,
};

/// POST /api/restaurants - 创建餐厅
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<RestaurantCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Restaurant>>)> {
    let restaurant = state.menu.create_restaurant(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Restaurant created successfully",
            restaurant,
        )),
    ))
}

/// GET /api/restaurants?page=&search= - 分页获取餐厅
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<RestaurantListQuery>,
) -> AppResult<Json<ApiResponse<PaginatedResponse<Restaurant>>>> {
    let page = state
        .menu
        .list_restaurants(query.page_number(), query.search)
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

/// GET /api/restaurants/search?query= - 按名称搜索餐厅
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<Vec<Restaurant>>>> {
    let restaurants = state.menu.search_restaurants(query.query).await?;
    Ok(Json(ApiResponse::success(restaurants)))
}

/// PUT /api/restaurants/{restaurant_id} - 更新餐厅 (名称/logo/描述)
pub async fn update(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
    ValidJson(payload): ValidJson<RestaurantUpdate>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    let restaurant = state.menu.edit_restaurant(restaurant_id, payload).await?;
    Ok(Json(ApiResponse::success_with_message(
        "Restaurant updated successfully",
        restaurant,
    )))
}

/// DELETE /api/restaurants/{restaurant_id} - 删除餐厅 (需要确认口令)
pub async fn delete(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
    ValidJson(payload): ValidJson<RestaurantDelete>,
) -> AppResult<Json<ApiResponse<RestaurantDeleted>>> {
    let deleted = state.menu.delete_restaurant(restaurant_id, payload).await?;
    Ok(Json(ApiResponse::success_with_message(
        "Restaurant deleted successfully",
        deleted,
    )))
}
