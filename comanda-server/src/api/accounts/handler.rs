//! Account API Handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use shared::ApiResponse;
use shared::models::{
    Account, AccountOpen, AddItemsRequest, CloseRequest, CommitRequest, CommitResponse,
};

use crate::api::{json_body, parse_id};
use crate::core::ServerState;
use crate::utils::AppResult;

type Reply<T> = AppResult<Json<ApiResponse<T>>>;

/// POST /api/accounts - 开台
pub async fn open(
    State(state): State<ServerState>,
    payload: Result<Json<AccountOpen>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Account>>)> {
    let data = json_body(payload)?;
    let account = state.accounts.open(data).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message("Account opened", account)),
    ))
}

/// GET /api/accounts/restaurant/:tenant/open - 未结账单 (open + finalized)
pub async fn list_open(
    State(state): State<ServerState>,
    Path(tenant): Path<String>,
) -> Reply<Vec<Account>> {
    let accounts = state.accounts.list_by_tenant(&tenant).await?;
    Ok(Json(ApiResponse::success(accounts)))
}

/// GET /api/accounts/:id
pub async fn get_by_id(State(state): State<ServerState>, Path(id): Path<String>) -> Reply<Account> {
    let id = parse_id(&id, "accountId")?;
    let account = state.accounts.get_detail(id).await?;
    Ok(Json(ApiResponse::success(account)))
}

/// POST /api/accounts/:id/items - 加菜 (未送厨)
pub async fn add_items(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<AddItemsRequest>, JsonRejection>,
) -> Reply<Account> {
    let id = parse_id(&id, "accountId")?;
    let data = json_body(payload)?;
    let account = state.accounts.add_items(id, data.items).await?;
    Ok(Json(ApiResponse::success_with_message("Items added", account)))
}

/// POST /api/accounts/:id/send-to-kitchen - 送厨
pub async fn send_to_kitchen(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<CommitRequest>, JsonRejection>,
) -> Reply<CommitResponse> {
    let id = parse_id(&id, "accountId")?;
    let data = json_body(payload)?;
    let response = state.accounts.commit_to_kitchen(id, data.item_ids).await?;
    Ok(Json(ApiResponse::success_with_message("Items sent to kitchen", response)))
}

/// DELETE /api/accounts/:id/items/:item_id
pub async fn remove_item(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
) -> Reply<Account> {
    let id = parse_id(&id, "accountId")?;
    let account = state.accounts.remove_item(id, &item_id).await?;
    Ok(Json(ApiResponse::success_with_message("Item removed", account)))
}

/// PUT /api/accounts/:id/finalize
pub async fn finalize(State(state): State<ServerState>, Path(id): Path<String>) -> Reply<Account> {
    let id = parse_id(&id, "accountId")?;
    let account = state.accounts.finalize(id).await?;
    Ok(Json(ApiResponse::success_with_message("Account finalized", account)))
}

/// PUT /api/accounts/:id/reopen
pub async fn reopen(State(state): State<ServerState>, Path(id): Path<String>) -> Reply<Account> {
    let id = parse_id(&id, "accountId")?;
    let account = state.accounts.reopen(id).await?;
    Ok(Json(ApiResponse::success_with_message("Account reopened", account)))
}

/// PUT /api/accounts/:id/close - 结账
pub async fn close(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<CloseRequest>, JsonRejection>,
) -> Reply<Account> {
    let id = parse_id(&id, "accountId")?;
    let data = json_body(payload)?;
    let account = state.accounts.close(id, data).await?;
    Ok(Json(ApiResponse::success_with_message("Account closed", account)))
}
