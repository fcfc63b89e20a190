//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`accounts`] - 账单 (tab) 生命周期
//! - [`movements`] - 现金流水与报表

pub mod accounts;
pub mod health;
pub mod movements;

use axum::Json;
use axum::extract::rejection::JsonRejection;

use crate::utils::{AppError, AppResult};

/// Numeric path id, rejected as a validation error otherwise
pub(crate) fn parse_id(raw: &str, field: &str) -> AppResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| {
        AppError::validation(format!("Invalid {field}: '{raw}'")).with_detail("field", field)
    })
}

/// Unwrap a JSON body, turning extractor rejections into validation errors
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::validation(rejection.body_text()))
}
