//! 统一错误处理
//!
//! [`AppError`] is the application-level error for HTTP handlers and the
//! billing engine. The wire format only carries a string
//! (`{"success": false, "error": "..."}`), but kinds stay distinguishable
//! internally so callers can branch on them.
//!
//! | 变体 | HTTP | 说明 |
//! |------|------|------|
//! | Validation | 400 | 参数缺失/格式错误 (空购物车、未知分类等) |
//! | NotFound | 404 | 未知 ID |
//! | InsufficientStock | 500 | 库存不足，消息原样透传 |
//! | Database / Internal | 500 | 存储或内部错误 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::response::ApiResponse;
use tracing::{error, warn};

use crate::db::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    /// 验证失败 (400)
    Validation(String),

    #[error("{0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("{0}")]
    /// 库存不足 (500, 消息透传)
    InsufficientStock(String),

    #[error("Database error: {0}")]
    /// 数据库错误 (500)
    Database(String),

    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// `AppError::not_found("Menu item")` → "Menu item not found"
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(format!("{} not found", resource.into()))
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::InsufficientStock(msg) => {
                warn!(target: "billing", error = %msg, "Stock rejection");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Validation(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::InsufficientStock(msg) => AppError::InsufficientStock(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// 处理器的 Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_errors_keep_their_kind() {
        let app: AppError = RepoError::NotFound("Bill not found".into()).into();
        assert!(matches!(app, AppError::NotFound(_)));

        let app: AppError = RepoError::InsufficientStock("Insufficient stock for X".into()).into();
        assert!(matches!(app, AppError::InsufficientStock(_)));
    }

    #[test]
    fn not_found_formats_resource_name() {
        assert_eq!(AppError::not_found("Menu item").to_string(), "Menu item not found");
    }
}
