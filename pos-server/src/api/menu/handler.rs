//! Menu Catalog API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use shared::models::{Category, MenuItem, MenuItemUpdate};
use shared::util::prefixed_id;

use crate::api::AppJson;
use crate::core::ServerState;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_TEXT_LEN, validate_non_negative, validate_optional_text, validate_price,
    validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct MenuListQuery {
    /// `?available=true` narrows the listing to available items
    pub available: Option<bool>,
}

/// GET /api/menu - 获取菜单 (可选 available 过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuListQuery>,
) -> AppResult<Json<ApiResponse<Vec<MenuItem>>>> {
    let items = state.menu.find_all(query.available.unwrap_or(false)).await?;
    Ok(Json(ApiResponse::success(items)))
}

/// GET /api/menu/categories - 获取现有分类
pub async fn categories(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let categories = state.menu.categories().await?;
    Ok(Json(ApiResponse::success(categories)))
}

/// GET /api/menu/category/{category} - 按分类获取菜单项
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<MenuItem>>>> {
    let category: Category = category.parse().map_err(AppError::Validation)?;
    let items = state.menu.find_by_category(category).await?;
    Ok(Json(ApiResponse::success(items)))
}

/// GET /api/menu/{id} - 获取单个菜单项
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    let item = state
        .menu
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Menu item"))?;
    Ok(Json(ApiResponse::success(item)))
}

/// POST /api/menu - 创建菜单项
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<shared::models::MenuItemCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<MenuItem>>)> {
    let (Some(name), Some(category), Some(price)) =
        (payload.name, payload.category, payload.price)
    else {
        return Err(AppError::validation("Please provide name, category, and price"));
    };

    validate_required_text(&name, "Name", MAX_NAME_LEN)?;
    validate_price(price)?;
    validate_optional_text(&payload.description, "Description", MAX_TEXT_LEN)?;
    if let Some(stock) = payload.stock_quantity {
        validate_non_negative(stock, "Stock quantity")?;
    }

    let mut item = MenuItem::new(
        payload.id.unwrap_or_else(|| prefixed_id("item")),
        name,
        category,
        price,
    );
    if let Some(description) = payload.description {
        item.description = description;
    }
    if let Some(icon) = payload.icon {
        item.icon = icon;
    }
    if let Some(available) = payload.available {
        item.available = available;
    }
    if let Some(stock_quantity) = payload.stock_quantity {
        item.stock_quantity = stock_quantity;
    }
    if let Some(low_stock_threshold) = payload.low_stock_threshold {
        item.low_stock_threshold = low_stock_threshold;
    }

    let item = state.menu.create(item).await?;
    tracing::info!(item_id = %item.id, name = %item.name, "Menu item created");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(item))))
}

/// PUT /api/menu/{id} - 更新菜单项 (部分字段)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<MenuItemUpdate>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "Name", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_price(price)?;
    }
    validate_optional_text(&payload.description, "Description", MAX_TEXT_LEN)?;
    if let Some(stock) = payload.stock_quantity {
        validate_non_negative(stock, "Stock quantity")?;
    }

    let item = state
        .menu
        .update(&id, payload)
        .await?
        .ok_or_else(|| AppError::not_found("Menu item"))?;
    Ok(Json(ApiResponse::success(item)))
}

/// DELETE /api/menu/{id} - 删除菜单项 (硬删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !state.menu.delete(&id).await? {
        return Err(AppError::not_found("Menu item"));
    }
    tracing::info!(item_id = %id, "Menu item deleted");
    Ok(Json(ApiResponse::message("Menu item deleted successfully")))
}
