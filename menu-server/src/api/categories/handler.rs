//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult, ValidJson};
use shared::models::{
    Category, CategoryCreate, CategoryCreated, CategoryUpdate, SubCategory, SubCategoryPayload,
};

/// GET /api/restaurants/{restaurant_id}/categories - 获取餐厅全部分类
pub async fn list(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let categories = state.menu.list_categories(restaurant_id).await?;
    Ok(Json(ApiResponse::success(categories)))
}

/// POST /api/restaurants/{restaurant_id}/categories - 创建分类
pub async fn create(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
    ValidJson(payload): ValidJson<CategoryCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<CategoryCreated>>)> {
    let created = state.menu.create_category(restaurant_id, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Category saved successfully",
            created,
        )),
    ))
}

/// PUT /api/restaurants/{restaurant_id}/categories/{category_id} - 重命名分类
pub async fn update(
    State(state): State<ServerState>,
    Path((restaurant_id, category_id)): Path<(i64, i64)>,
    ValidJson(payload): ValidJson<CategoryUpdate>,
) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let categories = state
        .menu
        .edit_category(restaurant_id, category_id, payload)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        "Category updated successfully",
        categories,
    )))
}

/// POST .../categories/{category_id}/subcategories - 创建子分类
pub async fn create_sub(
    State(state): State<ServerState>,
    Path((restaurant_id, category_id)): Path<(i64, i64)>,
    ValidJson(payload): ValidJson<SubCategoryPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<SubCategory>>)> {
    let sub = state
        .menu
        .create_subcategory(restaurant_id, category_id, payload)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            "Subcategory created successfully",
            sub,
        )),
    ))
}

/// PUT .../subcategories/{sub_category_id} - 重命名子分类
pub async fn update_sub(
    State(state): State<ServerState>,
    Path((restaurant_id, category_id, sub_category_id)): Path<(i64, i64, i64)>,
    ValidJson(payload): ValidJson<SubCategoryPayload>,
) -> AppResult<Json<ApiResponse<SubCategory>>> {
    let sub = state
        .menu
        .edit_subcategory(restaurant_id, category_id, sub_category_id, payload)
        .await?;
    Ok(Json(ApiResponse::success_with_message(
        "Subcategory updated successfully",
        sub,
    )))
}
