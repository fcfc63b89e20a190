//! 时间工具函数 — 业务时区转换
//!
//! 日期→时间戳转换统一在 service 层完成，
//! repository 层只接收 `i64` Unix millis。

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 日期 00:00:00 → Unix millis (业务时区)
///
/// DST gap: 本地零点不存在时 (夏令时跳跃)，取零点之后第一个有效的本地整点。
fn midnight_millis(date: NaiveDate, tz: Tz) -> i64 {
    (0..=3)
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
        .find_map(|time| date.and_time(time).and_local_timezone(tz).earliest())
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
}

/// 日期开始 (00:00:00) → Unix millis (业务时区)
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    midnight_millis(date, tz)
}

/// 日期结束 → 次日 00:00:00 的 Unix millis (业务时区)
///
/// 返回次日零点时间戳，调用方使用 `< end` (不含) 语义。
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    midnight_millis(next_day, tz)
}

/// Calendar date of a Unix millis timestamp in the business timezone
pub fn date_of_millis(millis: i64, tz: Tz) -> Option<NaiveDate> {
    chrono::DateTime::from_timestamp_millis(millis).map(|dt| dt.with_timezone(&tz).date_naive())
}
