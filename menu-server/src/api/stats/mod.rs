//! 统计 API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/restaurants/count", get(handler::restaurant_count))
        .route("/api/dishes/count", get(handler::dish_count))
}
