//! Billing API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/billing", billing_routes())
}

fn billing_routes() -> Router<ServerState> {
    // Static segments (/all, /range, /method, /summary) take precedence
    // over the {id} capture.
    Router::new()
        .route("/create", post(handler::create))
        .route("/all", get(handler::all))
        .route("/range/{start}/{end}", get(handler::list_by_range))
        .route("/method/{method}", get(handler::list_by_method))
        .route("/summary/sales", get(handler::get_sales_summary))
        .route("/summary/top-items", get(handler::get_top_items))
        .route("/summary/daily/{date}", get(handler::get_daily_summary))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
