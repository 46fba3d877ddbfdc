//! 时间工具函数
//!
//! 所有日期→时间戳转换统一在 API handler 层完成，
//! repository 层只接收 `i64` Unix millis。日界按 UTC 计算。

use chrono::{DateTime, NaiveDate};

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 日期开始 (00:00:00.000 UTC) → Unix millis
pub fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc()
        .timestamp_millis()
}

/// 日期结束 (23:59:59.999 UTC) → Unix millis
///
/// 含边界：调用方使用 `<= end` 语义。
pub fn day_end_millis(date: NaiveDate) -> i64 {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .expect("end of day is always valid")
        .and_utc()
        .timestamp_millis()
}

/// Which side of an inclusive range a bound sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Start,
    End,
}

/// 解析范围端点：RFC3339 时间戳或裸日期 (YYYY-MM-DD)。
///
/// 裸日期按端点语义展开：起点 → 当日 00:00:00.000，终点 → 当日
/// 23:59:59.999，两端均为含边界。
pub fn parse_range_bound(value: &str, bound: RangeBound) -> AppResult<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.timestamp_millis());
    }
    let date = parse_date(value)?;
    Ok(match bound {
        RangeBound::Start => day_start_millis(date),
        RangeBound::End => day_end_millis(date),
    })
}
