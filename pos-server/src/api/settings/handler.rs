//! Settings API Handlers
//!
//! Pass-through keyed blobs: responses carry the stored `data` value, not
//! the storage envelope.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::Value;

use crate::api::AppJson;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppError, AppResult};

/// Payload for settings upsert
#[derive(Debug, Deserialize)]
pub struct SettingsUpsert {
    pub data: Option<Value>,
}

/// GET /api/settings/{type} - 读取设置
pub async fn get(
    State(state): State<ServerState>,
    Path(kind): Path<String>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let entry = state
        .settings
        .get(&kind)
        .await?
        .ok_or_else(|| AppError::not_found("Settings"))?;
    Ok(Json(ApiResponse::success(entry.data)))
}

/// POST /api/settings/{type} - 写入设置 (last-write-wins)
pub async fn upsert(
    State(state): State<ServerState>,
    Path(kind): Path<String>,
    AppJson(payload): AppJson<SettingsUpsert>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let data = payload
        .data
        .ok_or_else(|| AppError::validation("Please provide data"))?;
    let entry = state.settings.upsert(&kind, data).await?;
    tracing::info!(kind = %entry.kind, "Settings updated");
    Ok(Json(ApiResponse::success(entry.data)))
}
