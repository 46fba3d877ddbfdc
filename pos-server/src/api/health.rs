//! 健康检查路由 - 公共路由

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::time::SystemTime;

use crate::core::{ServerState, StoreBackend};
use crate::utils::ApiResponse;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    status: &'static str,
    version: &'static str,
    store_backend: &'static str,
    uptime_seconds: u64,
    timestamp: String,
}

// 服务器启动时间 (懒加载静态变量)
static START_TIME: std::sync::OnceLock<SystemTime> = std::sync::OnceLock::new();

fn get_uptime_seconds() -> u64 {
    let start = START_TIME.get_or_init(SystemTime::now);
    SystemTime::now()
        .duration_since(*start)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub async fn health(State(state): State<ServerState>) -> Json<ApiResponse<HealthData>> {
    let data = HealthData {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        store_backend: match state.config.store_backend {
            StoreBackend::Memory => "memory",
            StoreBackend::Disk => "disk",
        },
        uptime_seconds: get_uptime_seconds(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    let mut response = ApiResponse::success(data);
    response.message = Some("Server is running".to_string());
    Json(response)
}
