//! Settings API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/settings",
        Router::new().route("/{type}", get(handler::get).post(handler::upsert)),
    )
}
