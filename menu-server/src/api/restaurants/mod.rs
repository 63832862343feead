//! Restaurant API 模块

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/restaurants", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // Static segment must win over /{restaurant_id}
        .route("/search", get(handler::search))
        .route(
            "/{restaurant_id}",
            put(handler::update).delete(handler::delete),
        )
}
