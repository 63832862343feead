//! Category / Subcategory API 模块
//!
//! 分类嵌入在餐厅文档中，所有路由都以餐厅 ID 开头

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/restaurants/{restaurant_id}/categories", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{category_id}", put(handler::update))
        .route("/{category_id}/subcategories", post(handler::create_sub))
        .route(
            "/{category_id}/subcategories/{sub_category_id}",
            put(handler::update_sub),
        )
}
