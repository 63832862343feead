//! Statistics API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};
use shared::models::{DishCount, RestaurantCount};

/// GET /api/restaurants/count - 餐厅总数
pub async fn restaurant_count(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<RestaurantCount>>> {
    let count = state.menu.count_restaurants().await?;
    Ok(Json(ApiResponse::success_with_message(
        "Total number of restaurants fetched successfully",
        count,
    )))
}

/// GET /api/dishes/count - 菜品总数 (全量扫描)
pub async fn dish_count(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<DishCount>>> {
    let count = state.menu.count_dishes().await?;
    Ok(Json(ApiResponse::success_with_message(
        "Total number of dishes fetched successfully",
        count,
    )))
}
