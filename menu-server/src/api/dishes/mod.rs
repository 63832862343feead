//! Dish API 模块
//!
//! 创建菜品只需要分类 ID (通过分类反查餐厅)；删除、列表、搜索以餐厅 ID 开头

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/categories/{category_id}/dishes",
            post(handler::create),
        )
        .route(
            "/api/categories/{category_id}/subcategories/{sub_category_id}/dishes",
            post(handler::create_in_sub),
        )
        .route(
            "/api/restaurants/{restaurant_id}/categories/{category_id}/dishes",
            delete(handler::delete),
        )
        .route(
            "/api/restaurants/{restaurant_id}/categories/{category_id}/subcategories/{sub_category_id}/dishes",
            delete(handler::delete_in_sub),
        )
        .route("/api/restaurants/{restaurant_id}/dishes", get(handler::list))
        .route(
            "/api/restaurants/{restaurant_id}/dishes/search",
            get(handler::search),
        )
}
