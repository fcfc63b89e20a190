//! Cash Movement API Handlers

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use shared::ApiResponse;
use shared::models::{CashSummary, DailyReport, Movement, MovementCreate};

use crate::api::{json_body, parse_id};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Query params for the daily report
#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    #[serde(alias = "date")]
    pub fecha: Option<String>,
}

/// POST /api/movements - 记录流水
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<MovementCreate>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Movement>>)> {
    let data = json_body(payload)?;
    let movement = state.ledger.record_movement(data).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message("Movement recorded", movement)),
    ))
}

/// DELETE /api/movements/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = parse_id(&id, "movementId")?;
    state.ledger.delete_movement(id).await?;
    Ok(Json(ApiResponse::message("Movement deleted")))
}

/// GET /api/movements/restaurant/:tenant?fecha=YYYY-MM-DD - 日报
pub async fn daily_report(
    State(state): State<ServerState>,
    Path(tenant): Path<String>,
    Query(query): Query<DailyQuery>,
) -> AppResult<Json<ApiResponse<DailyReport>>> {
    let date = query
        .fecha
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| AppError::validation("fecha is required (YYYY-MM-DD)").with_detail("field", "fecha"))?;
    let report = state.ledger.daily_report(&tenant, &date).await?;
    Ok(Json(ApiResponse::success(report)))
}

/// GET /api/movements/restaurant/:tenant/summary - 累计汇总
pub async fn summary(
    State(state): State<ServerState>,
    Path(tenant): Path<String>,
) -> AppResult<Json<ApiResponse<CashSummary>>> {
    let summary = state.ledger.cash_summary(&tenant).await?;
    Ok(Json(ApiResponse::success(summary)))
}
