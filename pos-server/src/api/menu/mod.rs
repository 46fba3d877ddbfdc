//! Menu Catalog API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", menu_routes())
}

fn menu_routes() -> Router<ServerState> {
    // Static segments take precedence over the {id} capture, so
    // /categories and /category/... are never read as item ids.
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/categories", get(handler::categories))
        .route("/category/{category}", get(handler::list_by_category))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
