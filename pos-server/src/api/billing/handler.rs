//! Billing API Handlers
//!
//! Checkout goes through the billing engine; every read-side summary is
//! computed in [`crate::sales`] over bills fetched from the repository.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use shared::models::{BillCreate, BillRecord, BillUpdate, PaymentMethod};

use crate::api::AppJson;
use crate::billing::engine;
use crate::core::ServerState;
use crate::sales::{self, DEFAULT_TOP_ITEMS_LIMIT, DailySummary, SalesSummary, TopItem};
use crate::utils::time::{self, RangeBound};
use crate::utils::{ApiResponse, AppError, AppResult};

/// POST /api/billing/create - 结账：购物车 → 账单
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<BillCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<BillRecord>>)> {
    let bill = engine::create_bill(state.menu.as_ref(), state.bills.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(bill))))
}

/// GET /api/billing/all - 所有账单 (最新在前)
pub async fn all(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<BillRecord>>>> {
    let bills = state.bills.find_all().await?;
    Ok(Json(ApiResponse::success(bills)))
}

/// GET /api/billing/range/{start}/{end} - 按时间范围查询 (含边界)
pub async fn list_by_range(
    State(state): State<ServerState>,
    Path((start, end)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<Vec<BillRecord>>>> {
    let start = time::parse_range_bound(&start, RangeBound::Start)?;
    let end = time::parse_range_bound(&end, RangeBound::End)?;
    let bills = state.bills.find_by_range(start, end).await?;
    Ok(Json(ApiResponse::success(bills)))
}

/// GET /api/billing/method/{method} - 按支付方式查询
pub async fn list_by_method(
    State(state): State<ServerState>,
    Path(method): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<BillRecord>>>> {
    let method: PaymentMethod = method.parse().map_err(AppError::Validation)?;
    let bills = state.bills.find_by_method(method).await?;
    Ok(Json(ApiResponse::success(bills)))
}

/// GET /api/billing/summary/sales - 销售汇总
pub async fn get_sales_summary(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<SalesSummary>>> {
    let bills = state.bills.find_all().await?;
    Ok(Json(ApiResponse::success(sales::sales_summary(&bills))))
}

#[derive(Debug, Deserialize)]
pub struct TopItemsQuery {
    pub limit: Option<usize>,
}

/// GET /api/billing/summary/top-items?limit= - 热销商品排行
pub async fn get_top_items(
    State(state): State<ServerState>,
    Query(query): Query<TopItemsQuery>,
) -> AppResult<Json<ApiResponse<Vec<TopItem>>>> {
    let bills = state.bills.find_all().await?;
    let top = sales::most_sold_items(&bills, query.limit.unwrap_or(DEFAULT_TOP_ITEMS_LIMIT));
    Ok(Json(ApiResponse::success(top)))
}

/// GET /api/billing/summary/daily/{date} - 单日汇总 (UTC 日界)
pub async fn get_daily_summary(
    State(state): State<ServerState>,
    Path(date): Path<String>,
) -> AppResult<Json<ApiResponse<DailySummary>>> {
    let date = time::parse_date(&date)?;
    let bills = state
        .bills
        .find_by_range(time::day_start_millis(date), time::day_end_millis(date))
        .await?;
    Ok(Json(ApiResponse::success(sales::daily_summary(&bills))))
}

/// GET /api/billing/{id} - 获取单个账单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<BillRecord>>> {
    let bill = state
        .bills
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Bill"))?;
    Ok(Json(ApiResponse::success(bill)))
}

/// PUT /api/billing/{id} - 更新账单 (服务端重算合计)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<BillUpdate>,
) -> AppResult<Json<ApiResponse<BillRecord>>> {
    let bill = engine::update_bill(state.bills.as_ref(), &id, payload).await?;
    Ok(Json(ApiResponse::success(bill)))
}

/// DELETE /api/billing/{id} - 删除账单
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !state.bills.delete(&id).await? {
        return Err(AppError::not_found("Bill"));
    }
    tracing::info!(bill_id = %id, "Bill deleted");
    Ok(Json(ApiResponse::message("Bill deleted successfully")))
}
